//! Search endpoint

use axum::extract::State;
use tracing::error;

use super::state::AppState;
use super::types::{ApiError, Json, SearchRequest, SearchResponse};

/// POST /search/
///
/// The cause of a failure is logged here; the client only sees the opaque
/// 500 produced by `From<DomainError> for ApiError`.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let found = state
        .search_service
        .search(&request.query)
        .await
        .inspect_err(|e| {
            error!(
                query = %request.query,
                kind = e.kind(),
                error = %e,
                "Search request failed"
            )
        })?;

    Ok(Json(SearchResponse::from(found)))
}
