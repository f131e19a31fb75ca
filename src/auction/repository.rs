// region:    --- Imports
use super::events::AuctionEvent;
use super::model::{Auction, AuctionDto, AuctionRow, Item, ItemPatch};
use super::queries;
use crate::database::DatabaseManager;
use crate::event_store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Repository Trait
/// 경매 저장소
///
/// 변경 메서드는 영향받은 행 수를 반환하고, 성공한 변경마다
/// 도메인 이벤트 하나를 같은 작업 단위 안에서 기록한다.
#[async_trait]
pub trait AuctionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Auction>, sqlx::Error>;

    async fn find(&self, id: Uuid) -> Result<Option<Auction>, sqlx::Error>;

    async fn insert(&self, auction: &Auction) -> Result<u64, sqlx::Error>;

    async fn patch_item(
        &self,
        id: Uuid,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error>;

    async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error>;
}
// endregion: --- Repository Trait

// region:    --- Postgres Repository
pub struct PgAuctionRepository {
    db_manager: Arc<DatabaseManager>,
}

impl PgAuctionRepository {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl AuctionRepository for PgAuctionRepository {
    async fn list(&self) -> Result<Vec<Auction>, sqlx::Error> {
        debug!("{:<12} --> 모든 경매 조회", "Repository");
        sqlx::query_as::<_, AuctionRow>(queries::LIST_AUCTIONS)
            .fetch_all(self.db_manager.pool())
            .await?
            .into_iter()
            .map(Auction::try_from)
            .collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Auction>, sqlx::Error> {
        debug!("{:<12} --> 경매 조회 id: {}", "Repository", id);
        sqlx::query_as::<_, AuctionRow>(queries::GET_AUCTION)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?
            .map(Auction::try_from)
            .transpose()
    }

    async fn insert(&self, auction: &Auction) -> Result<u64, sqlx::Error> {
        let auction = auction.clone();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let inserted = sqlx::query(queries::INSERT_AUCTION)
                        .bind(auction.id)
                        .bind(&auction.seller)
                        .bind(auction.reserve_price)
                        .bind(auction.sold_amount)
                        .bind(auction.current_high_bid)
                        .bind(auction.status.as_str())
                        .bind(auction.created_at)
                        .bind(auction.updated_at)
                        .execute(&mut **tx)
                        .await?
                        .rows_affected();
                    if inserted == 0 {
                        return Ok(0);
                    }

                    let item = &auction.item;
                    sqlx::query(queries::INSERT_ITEM)
                        .bind(item.id)
                        .bind(auction.id)
                        .bind(&item.make)
                        .bind(&item.model)
                        .bind(item.year)
                        .bind(&item.color)
                        .bind(item.mileage)
                        .bind(&item.image_url)
                        .execute(&mut **tx)
                        .await?;

                    let event = AuctionEvent::AuctionCreated {
                        auction: AuctionDto::from(&auction),
                    };
                    event_store::append_event(&mut **tx, &event, auction.created_at).await?;

                    info!("{:<12} --> 경매 생성 id: {}", "Repository", auction.id);
                    Ok::<_, sqlx::Error>(inserted)
                })
            })
            .await
    }

    async fn patch_item(
        &self,
        id: Uuid,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let patch = patch.clone();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let item = sqlx::query_as::<_, Item>(queries::PATCH_ITEM)
                        .bind(id)
                        .bind(patch.make)
                        .bind(patch.model)
                        .bind(patch.year)
                        .bind(patch.color)
                        .bind(patch.mileage)
                        .bind(patch.image_url)
                        .fetch_optional(&mut **tx)
                        .await?;
                    let Some(item) = item else {
                        return Ok(0);
                    };

                    sqlx::query(queries::TOUCH_AUCTION)
                        .bind(id)
                        .bind(updated_at)
                        .execute(&mut **tx)
                        .await?;

                    let event = AuctionEvent::AuctionUpdated { id, item };
                    event_store::append_event(&mut **tx, &event, updated_at).await?;

                    info!("{:<12} --> 경매 수정 id: {}", "Repository", id);
                    Ok::<_, sqlx::Error>(1)
                })
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let deleted = sqlx::query(queries::DELETE_AUCTION)
                        .bind(id)
                        .execute(&mut **tx)
                        .await?
                        .rows_affected();
                    if deleted == 0 {
                        return Ok(0);
                    }

                    let event = AuctionEvent::AuctionDeleted { id };
                    event_store::append_event(&mut **tx, &event, Utc::now()).await?;

                    info!("{:<12} --> 경매 삭제 id: {}", "Repository", id);
                    Ok::<_, sqlx::Error>(deleted)
                })
            })
            .await
    }
}
// endregion: --- Postgres Repository
