// region:    --- Imports
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Auction Error
/// 경매 저장소 요청 처리 중 발생하는 오류
#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("auction not found: `{0}`")]
    NotFound(Uuid),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("store reported no affected rows while {0}")]
    Persistence(&'static str),
    #[error("database error: `{0}`")]
    Database(#[from] sqlx::Error),
}

impl From<JsonRejection> for AuctionError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AuctionError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Validation(_) | Self::Persistence(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::Database(e) => {
                error!("{:<12} --> 데이터베이스 오류: {:?}", "Error", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
// endregion: --- Auction Error

// region:    --- Search Error
/// 검색 인덱스 초기화 및 조회 오류
///
/// 시작 단계에서 발생하면 프로세스를 중단한다.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("mongodb error: `{0}`")]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to read seed file `{path}`: {source}")]
    SeedFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed seed file: {0}")]
    SeedFileFormat(#[from] serde_json::Error),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        error!("{:<12} --> 검색 오류: {:?}", "Error", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                message: "Something went wrong".to_string(),
            }),
        )
            .into_response()
    }
}
// endregion: --- Search Error

// region:    --- Config Error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` must be set")]
    Missing(&'static str),
    #[error("environment variable `{key}` has an invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}
// endregion: --- Config Error

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
