use crate::auction::model::{AuctionDto, Item};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 검색용 상품 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    /// 원본 경매 식별자 (문자열 형태로 저장)
    pub auction_id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub mileage: i32,
    #[serde(default)]
    pub image_url: String,
}

impl SearchItem {
    pub fn from_item(auction_id: Uuid, item: &Item) -> Self {
        Self {
            auction_id: auction_id.to_string(),
            make: item.make.clone(),
            model: item.model.clone(),
            year: item.year,
            color: item.color.clone(),
            mileage: item.mileage,
            image_url: item.image_url.clone(),
        }
    }
}

impl From<&AuctionDto> for SearchItem {
    fn from(auction: &AuctionDto) -> Self {
        Self {
            auction_id: auction.id.to_string(),
            make: auction.make.clone(),
            model: auction.model.clone(),
            year: auction.year,
            color: auction.color.clone(),
            mileage: auction.mileage,
            image_url: auction.image_url.clone(),
        }
    }
}

/// 시드 파일 레코드. 키는 소문자로 정규화된 뒤 매칭된다.
///
/// 식별자 외의 필드는 없으면 기본값을 쓰고, 모르는 키는 무시한다.
#[derive(Debug, Deserialize)]
pub struct SeedRecord {
    #[serde(alias = "auctionid")]
    pub id: Uuid,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub mileage: i32,
    #[serde(default, rename = "imageurl")]
    pub image_url: String,
}

impl From<SeedRecord> for SearchItem {
    fn from(record: SeedRecord) -> Self {
        Self {
            auction_id: record.id.to_string(),
            make: record.make,
            model: record.model,
            year: record.year,
            color: record.color,
            mileage: record.mileage,
            image_url: record.image_url,
        }
    }
}
