use crate::auction::model::{AuctionDto, Item};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 경매 저장소 변경 이벤트
///
/// 변경과 같은 트랜잭션에서 outbox 에 기록되고 검색 인덱스가 소비한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuctionEvent {
    // 경매 생성
    AuctionCreated { auction: AuctionDto },
    // 상품 수정 (수정 후 상태 전체)
    AuctionUpdated { id: Uuid, item: Item },
    // 경매 삭제
    AuctionDeleted { id: Uuid },
}

impl AuctionEvent {
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            Self::AuctionCreated { auction } => auction.id,
            Self::AuctionUpdated { id, .. } | Self::AuctionDeleted { id } => *id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AuctionCreated { .. } => "AuctionCreated",
            Self::AuctionUpdated { .. } => "AuctionUpdated",
            Self::AuctionDeleted { .. } => "AuctionDeleted",
        }
    }
}
