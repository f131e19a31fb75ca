use super::index::ItemIndex;
use super::model::SearchItem;
use crate::error::SearchError;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_term: Option<String>,
}

/// 검색 라우터
pub fn routes(index: Arc<dyn ItemIndex>) -> Router {
    Router::new()
        .route("/api/search", get(handle_search))
        .with_state(index)
}

/// 상품 검색
pub async fn handle_search(
    State(index): State<Arc<dyn ItemIndex>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchItem>>, SearchError> {
    info!("{:<12} --> 상품 검색: {:?}", "HandlerQuery", params.search_term);
    let items = index.search(params.search_term.as_deref()).await?;
    Ok(Json(items))
}
