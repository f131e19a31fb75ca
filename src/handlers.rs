// region:    --- Imports
use crate::auction::model::{AuctionDto, CreateAuctionDto, ItemPatch, UpdateAuctionDto};
use crate::auction::repository::AuctionRepository;
use crate::auction::service::{self, PLACEHOLDER_SELLER};
use crate::error::AuctionError;
use axum::extract::{FromRequest, FromRequestParts, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- State & Extractors
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AuctionRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn AuctionRepository>) -> Self {
        Self { repository }
    }
}

/// 잘못된 본문을 400 으로 거부하는 JSON 추출기
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuctionError))]
pub struct ApiJson<T>(pub T);

/// 파싱할 수 없는 식별자를 400 으로 거부하는 경로 추출기
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AuctionError))]
pub struct ApiPath<T>(pub T);
// endregion: --- State & Extractors

/// 경매 라우터
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/auctions",
            get(handle_list_auctions).post(handle_create_auction),
        )
        .route(
            "/api/auctions/:id",
            get(handle_get_auction)
                .put(handle_update_auction)
                .delete(handle_delete_auction),
        )
        .with_state(state)
}

// region:    --- Query Handlers

/// 모든 경매 조회
pub async fn handle_list_auctions(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuctionDto>>, AuctionError> {
    info!("{:<12} --> 모든 경매 조회", "HandlerQuery");
    let auctions = service::list_auctions(state.repository.as_ref()).await?;
    Ok(Json(auctions))
}

/// 경매 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<AuctionDto>, AuctionError> {
    info!("{:<12} --> 경매 조회 id: {}", "HandlerQuery", id);
    let auction = service::get_auction(state.repository.as_ref(), id).await?;
    Ok(Json(auction))
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 경매 생성
pub async fn handle_create_auction(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateAuctionDto>,
) -> Result<impl IntoResponse, AuctionError> {
    info!("{:<12} --> 경매 생성 요청: {:?}", "Command", input);
    let auction =
        service::create_auction(state.repository.as_ref(), input, PLACEHOLDER_SELLER).await?;
    let location = format!("/api/auctions/{}", auction.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(auction),
    ))
}

/// 경매 수정
pub async fn handle_update_auction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateAuctionDto>,
) -> Result<StatusCode, AuctionError> {
    info!("{:<12} --> 경매 수정 요청 id: {}, {:?}", "Command", id, input);
    service::update_auction(state.repository.as_ref(), id, ItemPatch::from(input)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 경매 삭제
pub async fn handle_delete_auction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AuctionError> {
    info!("{:<12} --> 경매 삭제 요청 id: {}", "Command", id);
    service::delete_auction(state.repository.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Command Handlers
