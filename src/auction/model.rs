use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// region:    --- Entities
/// 경매 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionStatus {
    Live,
    Finished,
    ReserveNotMet,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Finished => "Finished",
            Self::ReserveNotMet => "ReserveNotMet",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Live" => Ok(Self::Live),
            "Finished" => Ok(Self::Finished),
            "ReserveNotMet" => Ok(Self::ReserveNotMet),
            other => Err(format!("unknown auction status `{other}`")),
        }
    }
}

// 경매 모델
#[derive(Debug, Clone, PartialEq)]
pub struct Auction {
    pub id: Uuid,
    pub seller: String,
    pub reserve_price: i32,
    pub sold_amount: Option<i32>,
    pub current_high_bid: Option<i32>,
    pub status: AuctionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item: Item,
}

// 상품 모델 (경매에 종속)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub mileage: i32,
    pub image_url: String,
}

impl Item {
    /// 정규화된 패치를 필드 단위로 적용
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(make) = &patch.make {
            self.make = make.clone();
        }
        if let Some(model) = &patch.model {
            self.model = model.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(mileage) = patch.mileage {
            self.mileage = mileage;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
    }
}

/// 경매 + 상품 조인 결과 행
#[derive(Debug, sqlx::FromRow)]
pub struct AuctionRow {
    pub id: Uuid,
    pub seller: String,
    pub reserve_price: i32,
    pub sold_amount: Option<i32>,
    pub current_high_bid: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub mileage: i32,
    pub image_url: String,
}

impl TryFrom<AuctionRow> for Auction {
    type Error = sqlx::Error;

    fn try_from(row: AuctionRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: String| sqlx::Error::Decode(e.into()))?;
        Ok(Self {
            id: row.id,
            seller: row.seller,
            reserve_price: row.reserve_price,
            sold_amount: row.sold_amount,
            current_high_bid: row.current_high_bid,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            item: Item {
                id: row.item_id,
                make: row.make,
                model: row.model,
                year: row.year,
                color: row.color,
                mileage: row.mileage,
                image_url: row.image_url,
            },
        })
    }
}
// endregion: --- Entities

// region:    --- DTOs
/// 외부로 노출되는 평탄화된 경매 표현
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDto {
    pub id: Uuid,
    pub seller: String,
    pub reserve_price: i32,
    pub sold_amount: Option<i32>,
    pub current_high_bid: Option<i32>,
    pub status: AuctionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub mileage: i32,
    pub image_url: String,
}

impl From<&Auction> for AuctionDto {
    fn from(auction: &Auction) -> Self {
        Self {
            id: auction.id,
            seller: auction.seller.clone(),
            reserve_price: auction.reserve_price,
            sold_amount: auction.sold_amount,
            current_high_bid: auction.current_high_bid,
            status: auction.status,
            created_at: auction.created_at,
            updated_at: auction.updated_at,
            make: auction.item.make.clone(),
            model: auction.item.model.clone(),
            year: auction.item.year,
            color: auction.item.color.clone(),
            mileage: auction.item.mileage,
            image_url: auction.item.image_url.clone(),
        }
    }
}

/// 경매 생성 요청
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuctionDto {
    #[serde(alias = "Make")]
    pub make: String,
    #[serde(alias = "Model")]
    pub model: String,
    #[serde(alias = "Year")]
    pub year: i32,
    #[serde(alias = "Color")]
    pub color: String,
    #[serde(alias = "Mileage")]
    pub mileage: i32,
    #[serde(default, alias = "ImageUrl")]
    pub image_url: String,
    #[serde(default, alias = "ReservePrice")]
    pub reserve_price: i32,
}

impl CreateAuctionDto {
    /// 필수 문자열 필드 검증
    pub fn validate(&self) -> Result<(), String> {
        let blank: Vec<&str> = [
            ("make", &self.make),
            ("model", &self.model),
            ("color", &self.color),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(format!("required fields are blank: {}", blank.join(", ")))
        }
    }
}

/// 경매 수정 요청 (merge-patch)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuctionDto {
    #[serde(default, alias = "Make")]
    pub make: Option<String>,
    #[serde(default, alias = "Model")]
    pub model: Option<String>,
    #[serde(default, alias = "Year")]
    pub year: Option<i32>,
    #[serde(default, alias = "Color")]
    pub color: Option<String>,
    #[serde(default, alias = "Mileage")]
    pub mileage: Option<i32>,
    #[serde(default, alias = "ImageUrl")]
    pub image_url: Option<String>,
}

/// 정규화된 상품 패치. `None` 은 "변경 없음".
///
/// 숫자 필드는 0 을 "변경 없음" 으로 취급한다. 명시적인 0 과
/// 생략을 구분하지 않는 알려진 정책이며 이 변환에서만 적용된다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub image_url: Option<String>,
}

impl From<UpdateAuctionDto> for ItemPatch {
    fn from(dto: UpdateAuctionDto) -> Self {
        Self {
            make: dto.make,
            model: dto.model,
            year: dto.year.filter(|year| *year != 0),
            color: dto.color,
            mileage: dto.mileage.filter(|mileage| *mileage != 0),
            image_url: dto.image_url,
        }
    }
}
// endregion: --- DTOs
