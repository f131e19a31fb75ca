// region:    --- Imports
use super::index::ItemIndex;
use super::model::SearchItem;
use crate::auction::events::AuctionEvent;
use crate::error::SearchError;
use crate::event_store::AUCTION_EVENTS_TOPIC;
use crate::message_broker::KafkaConsumer;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Event Consumer
/// 경매 이벤트를 검색 인덱스에 반영
///
/// 모든 반영은 경매 식별자 기준 upsert/삭제이므로 중복 수신해도 결과가 같다.
pub struct AuctionEventConsumer {
    index: Arc<dyn ItemIndex>,
}

impl AuctionEventConsumer {
    pub fn new(index: Arc<dyn ItemIndex>) -> Self {
        Self { index }
    }

    /// 이벤트 소비 시작
    ///
    /// 반영에 실패한 이벤트는 성공할 때까지 재시도되며 그 전에는 커밋되지 않는다.
    pub async fn start(&self, kafka_consumer: Arc<KafkaConsumer>) {
        kafka_consumer
            .consume_events(AUCTION_EVENTS_TOPIC, |event: AuctionEvent| {
                self.apply(event)
            })
            .await;
    }

    /// 이벤트 반영
    pub async fn apply(&self, event: AuctionEvent) -> Result<(), SearchError> {
        match event {
            AuctionEvent::AuctionCreated { auction } => {
                info!("{:<12} --> 생성 반영 id: {}", "Consumer", auction.id);
                self.index.upsert(SearchItem::from(&auction)).await
            }
            AuctionEvent::AuctionUpdated { id, item } => {
                info!("{:<12} --> 수정 반영 id: {}", "Consumer", id);
                self.index.upsert(SearchItem::from_item(id, &item)).await
            }
            AuctionEvent::AuctionDeleted { id } => {
                let removed = self.index.remove(id).await?;
                info!(
                    "{:<12} --> 삭제 반영 id: {} ({}건)",
                    "Consumer", id, removed
                );
                Ok(())
            }
        }
    }
}
// endregion: --- Event Consumer
