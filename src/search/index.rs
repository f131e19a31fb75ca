// region:    --- Imports
use super::model::SearchItem;
use crate::config::SearchConfig;
use crate::error::SearchError;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info};
use uuid::Uuid;

// endregion: --- Imports

/// 상품 텍스트 인덱스 이름
pub const TEXT_INDEX_NAME: &str = "item_text";

// region:    --- Item Index Trait
/// 검색용 상품 컬렉션
#[async_trait]
pub trait ItemIndex: Send + Sync {
    /// make, model, color 복합 텍스트 인덱스 생성 (이미 있으면 무시)
    async fn ensure_text_index(&self) -> Result<(), SearchError>;

    async fn count(&self) -> Result<u64, SearchError>;

    async fn insert_many(&self, items: Vec<SearchItem>) -> Result<(), SearchError>;

    /// 경매 식별자 기준으로 교체 또는 삽입
    async fn upsert(&self, item: SearchItem) -> Result<(), SearchError>;

    async fn remove(&self, auction_id: Uuid) -> Result<u64, SearchError>;

    /// 검색어가 없으면 전체를 반환한다. 결과는 제조사 오름차순.
    async fn search(&self, term: Option<&str>) -> Result<Vec<SearchItem>, SearchError>;
}
// endregion: --- Item Index Trait

// region:    --- Mongo Index
pub struct MongoItemIndex {
    collection: Collection<SearchItem>,
}

impl MongoItemIndex {
    /// 연결 문자열로 컬렉션 연결
    pub async fn connect(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::with_uri_str(&config.mongo_url).await?;
        let collection = client
            .database(&config.database)
            .collection::<SearchItem>(&config.collection);
        info!(
            "{:<12} --> MongoDB 연결: {}.{}",
            "Search", config.database, config.collection
        );
        Ok(Self { collection })
    }

    fn auction_filter(auction_id: &str) -> Document {
        doc! { "auctionId": auction_id }
    }
}

#[async_trait]
impl ItemIndex for MongoItemIndex {
    async fn ensure_text_index(&self) -> Result<(), SearchError> {
        let index = IndexModel::builder()
            .keys(doc! { "make": "text", "model": "text", "color": "text" })
            .options(IndexOptions::builder().name(TEXT_INDEX_NAME.to_string()).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, SearchError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn insert_many(&self, items: Vec<SearchItem>) -> Result<(), SearchError> {
        if items.is_empty() {
            return Ok(());
        }
        let result = self.collection.insert_many(items).await?;
        debug!(
            "{:<12} --> 문서 {}건 삽입",
            "Search",
            result.inserted_ids.len()
        );
        Ok(())
    }

    async fn upsert(&self, item: SearchItem) -> Result<(), SearchError> {
        self.collection
            .replace_one(Self::auction_filter(&item.auction_id), &item)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn remove(&self, auction_id: Uuid) -> Result<u64, SearchError> {
        let result = self
            .collection
            .delete_many(Self::auction_filter(&auction_id.to_string()))
            .await?;
        Ok(result.deleted_count)
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<SearchItem>, SearchError> {
        let filter = match term.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => doc! { "$text": { "$search": term } },
            None => doc! {},
        };
        let cursor = self.collection.find(filter).sort(doc! { "make": 1 }).await?;
        let items: Vec<SearchItem> = cursor.try_collect().await?;
        debug!("{:<12} --> 검색 결과 {}건", "Search", items.len());
        Ok(items)
    }
}
// endregion: --- Mongo Index
