//! 경매 저장소 작업
//! 1. 목록 / 단건 조회
//! 2. 생성
//! 3. 수정 (merge-patch)
//! 4. 삭제
// region:    --- Imports
use super::model::{Auction, AuctionDto, AuctionStatus, CreateAuctionDto, Item, ItemPatch};
use super::repository::AuctionRepository;
use crate::error::AuctionError;
use chrono::{SubsecRound, Utc};
use tracing::{info, warn};
use uuid::Uuid;

// endregion: --- Imports

/// 인증 도입 전까지 사용하는 판매자 식별자
pub const PLACEHOLDER_SELLER: &str = "Seller";

// region:    --- Queries
/// 모든 경매 조회 (상품 제조사 오름차순)
pub async fn list_auctions(
    repo: &dyn AuctionRepository,
) -> Result<Vec<AuctionDto>, AuctionError> {
    let auctions = repo.list().await?;
    info!("{:<12} --> 경매 {}건 조회", "Service", auctions.len());
    Ok(auctions.iter().map(AuctionDto::from).collect())
}

/// 경매 조회
pub async fn get_auction(
    repo: &dyn AuctionRepository,
    id: Uuid,
) -> Result<AuctionDto, AuctionError> {
    repo.find(id)
        .await?
        .map(|auction| AuctionDto::from(&auction))
        .ok_or(AuctionError::NotFound(id))
}
// endregion: --- Queries

// region:    --- Commands
/// 경매 생성
pub async fn create_auction(
    repo: &dyn AuctionRepository,
    input: CreateAuctionDto,
    seller: &str,
) -> Result<AuctionDto, AuctionError> {
    input.validate().map_err(AuctionError::Validation)?;

    // Postgres timestamptz 정밀도(마이크로초)에 맞춘다
    let now = Utc::now().trunc_subsecs(6);
    let auction = Auction {
        id: Uuid::new_v4(),
        seller: seller.to_string(),
        reserve_price: input.reserve_price,
        sold_amount: None,
        current_high_bid: None,
        status: AuctionStatus::Live,
        created_at: now,
        updated_at: now,
        item: Item {
            id: Uuid::new_v4(),
            make: input.make,
            model: input.model,
            year: input.year,
            color: input.color,
            mileage: input.mileage,
            image_url: input.image_url,
        },
    };

    if repo.insert(&auction).await? == 0 {
        warn!("{:<12} --> 경매 생성 결과 없음 id: {}", "Service", auction.id);
        return Err(AuctionError::Persistence("creating the auction"));
    }

    Ok(AuctionDto::from(&auction))
}

/// 경매 수정
///
/// 문자열은 값이 있으면(빈 문자열 포함) 덮어쓰고, 숫자는 0 이 아닐 때만 적용한다.
pub async fn update_auction(
    repo: &dyn AuctionRepository,
    id: Uuid,
    patch: ItemPatch,
) -> Result<(), AuctionError> {
    if repo.find(id).await?.is_none() {
        return Err(AuctionError::NotFound(id));
    }

    if repo.patch_item(id, &patch, Utc::now().trunc_subsecs(6)).await? == 0 {
        warn!("{:<12} --> 경매 수정 결과 없음 id: {}", "Service", id);
        return Err(AuctionError::Persistence("updating the auction"));
    }
    Ok(())
}

/// 경매 삭제
pub async fn delete_auction(
    repo: &dyn AuctionRepository,
    id: Uuid,
) -> Result<(), AuctionError> {
    if repo.find(id).await?.is_none() {
        return Err(AuctionError::NotFound(id));
    }

    if repo.delete(id).await? == 0 {
        warn!("{:<12} --> 경매 삭제 결과 없음 id: {}", "Service", id);
        return Err(AuctionError::Persistence("deleting the auction"));
    }
    Ok(())
}
// endregion: --- Commands
