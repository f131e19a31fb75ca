#![allow(dead_code)]

use async_trait::async_trait;
use auction_listings::auction::events::AuctionEvent;
use auction_listings::auction::model::{Auction, AuctionDto, ItemPatch};
use auction_listings::auction::repository::AuctionRepository;
use auction_listings::error::SearchError;
use auction_listings::search::index::ItemIndex;
use auction_listings::search::model::SearchItem;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// 메모리 기반 경매 저장소
#[derive(Default)]
pub struct InMemoryAuctionRepository {
    auctions: Mutex<Vec<Auction>>,
    events: Mutex<Vec<AuctionEvent>>,
    // true 이면 변경이 0 행을 반환한다 (동시 삭제 경합 흉내)
    pub drop_writes: AtomicBool,
}

impl InMemoryAuctionRepository {
    pub fn events(&self) -> Vec<AuctionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn drop_writes(&self, value: bool) {
        self.drop_writes.store(value, Ordering::SeqCst);
    }

    fn dropping(&self) -> bool {
        self.drop_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuctionRepository for InMemoryAuctionRepository {
    async fn list(&self) -> Result<Vec<Auction>, sqlx::Error> {
        let mut auctions = self.auctions.lock().unwrap().clone();
        auctions.sort_by(|a, b| a.item.make.cmp(&b.item.make));
        Ok(auctions)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Auction>, sqlx::Error> {
        Ok(self
            .auctions
            .lock()
            .unwrap()
            .iter()
            .find(|auction| auction.id == id)
            .cloned())
    }

    async fn insert(&self, auction: &Auction) -> Result<u64, sqlx::Error> {
        if self.dropping() {
            return Ok(0);
        }
        self.auctions.lock().unwrap().push(auction.clone());
        self.events.lock().unwrap().push(AuctionEvent::AuctionCreated {
            auction: AuctionDto::from(auction),
        });
        Ok(1)
    }

    async fn patch_item(
        &self,
        id: Uuid,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        if self.dropping() {
            return Ok(0);
        }
        let mut auctions = self.auctions.lock().unwrap();
        let Some(auction) = auctions.iter_mut().find(|auction| auction.id == id) else {
            return Ok(0);
        };
        auction.item.apply(patch);
        auction.updated_at = updated_at;
        self.events.lock().unwrap().push(AuctionEvent::AuctionUpdated {
            id,
            item: auction.item.clone(),
        });
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        if self.dropping() {
            return Ok(0);
        }
        let mut auctions = self.auctions.lock().unwrap();
        let before = auctions.len();
        auctions.retain(|auction| auction.id != id);
        let deleted = (before - auctions.len()) as u64;
        if deleted > 0 {
            self.events
                .lock()
                .unwrap()
                .push(AuctionEvent::AuctionDeleted { id });
        }
        Ok(deleted)
    }
}

/// 메모리 기반 검색 컬렉션
#[derive(Default)]
pub struct InMemoryItemIndex {
    docs: Mutex<Vec<SearchItem>>,
    pub text_index_calls: AtomicUsize,
    // 0 이 될 때까지 쓰기가 실패한다 (인덱스 장애 흉내)
    failing_writes: AtomicUsize,
}

impl InMemoryItemIndex {
    pub fn with_items(items: Vec<SearchItem>) -> Self {
        Self {
            docs: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn docs(&self) -> Vec<SearchItem> {
        self.docs.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, times: usize) {
        self.failing_writes.store(times, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), SearchError> {
        let failing = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match failing {
            Ok(_) => Err(SearchError::SeedFileRead {
                path: "in-memory".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "index unavailable",
                ),
            }),
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl ItemIndex for InMemoryItemIndex {
    async fn ensure_text_index(&self) -> Result<(), SearchError> {
        self.text_index_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn count(&self) -> Result<u64, SearchError> {
        Ok(self.docs.lock().unwrap().len() as u64)
    }

    async fn insert_many(&self, items: Vec<SearchItem>) -> Result<(), SearchError> {
        self.docs.lock().unwrap().extend(items);
        Ok(())
    }

    async fn upsert(&self, item: SearchItem) -> Result<(), SearchError> {
        self.check_write()?;
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|doc| doc.auction_id == item.auction_id) {
            Some(doc) => *doc = item,
            None => docs.push(item),
        }
        Ok(())
    }

    async fn remove(&self, auction_id: Uuid) -> Result<u64, SearchError> {
        self.check_write()?;
        let auction_id = auction_id.to_string();
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|doc| doc.auction_id != auction_id);
        Ok((before - docs.len()) as u64)
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<SearchItem>, SearchError> {
        let term = term.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty());
        let mut found: Vec<SearchItem> = self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| match &term {
                Some(term) => [&doc.make, &doc.model, &doc.color]
                    .iter()
                    .any(|field| field.to_lowercase() == *term),
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.make.cmp(&b.make));
        Ok(found)
    }
}
