//! HTTP router assembly

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::search;
use super::state::AppState;
use super::types::ApiError;
use crate::infrastructure::observability::{PrometheusMetrics, create_metrics_router};

pub const ROOT_PATH: &str = "/";
pub const SEARCH_PATH: &str = "/search/";
pub const SEARCH_PATH_NO_SLASH: &str = "/search";
pub const HEALTH_PATH: &str = "/health";
pub const READY_PATH: &str = "/ready";
pub const LIVE_PATH: &str = "/live";

/// Every route served by [`create_router`]; the metrics path may not reuse one
pub const ROUTES: &[&str] = &[
    ROOT_PATH,
    SEARCH_PATH,
    SEARCH_PATH_NO_SLASH,
    HEALTH_PATH,
    READY_PATH,
    LIVE_PATH,
];

/// Create the full router with application state
///
/// The metrics endpoint is merged outside the request middleware so scrapes
/// are not counted as traffic.
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = Router::new()
        .route(ROOT_PATH, get(health::root))
        .route(SEARCH_PATH, post(search::search))
        .route(SEARCH_PATH_NO_SLASH, post(search::search))
        // Health endpoints
        .route(HEALTH_PATH, get(health::health_check))
        .route(READY_PATH, get(health::ready_check))
        .route(LIVE_PATH, get(health::live_check))
        .fallback(|| async { ApiError::not_found("Not Found") })
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http());

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::cache::{Cache, MockCache};
    use crate::domain::search::{Game, Provider, SearchRepository};
    use crate::infrastructure::services::{CachedSearchService, SearchQueryService};
    use crate::infrastructure::storage::InMemorySearchRepository;

    fn catalogue() -> Arc<dyn SearchRepository> {
        Arc::new(InMemorySearchRepository::with_entities(
            vec![
                Game::new(1, "Blackjack Pro"),
                Game::new(2, "European Roulette"),
            ],
            vec![Provider::new(1, "Evolution")],
        ))
    }

    fn app_with(cache: Arc<dyn Cache>) -> Router {
        let service = CachedSearchService::new(cache, SearchQueryService::new(catalogue()));
        create_router(AppState::from_service(service), None)
    }

    fn search_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_miss_then_hit() {
        let app = app_with(Arc::new(MockCache::new()));

        let response = app
            .clone()
            .oneshot(search_request("/search/", r#"{"query":"e"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Search query processed successfully",
                "data": {"games": [2], "providers": [1]},
                "cache": false
            })
        );

        let response = app
            .oneshot(search_request("/search/", r#"{"query":"e"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Search query processed successfully (from cache)",
                "data": {"games": [2], "providers": [1]},
                "cache": true
            })
        );
    }

    #[tokio::test]
    async fn test_search_without_trailing_slash() {
        let app = app_with(Arc::new(MockCache::new()));

        let response = app
            .oneshot(search_request("/search", r#"{"query":"jack"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], json!({"games": [1], "providers": []}));
    }

    #[tokio::test]
    async fn test_cache_down_is_opaque_500() {
        let app = app_with(Arc::new(
            MockCache::new().with_error("Connection refused (os error 111)"),
        ));

        let response = app
            .oneshot(search_request("/search/", r#"{"query":"jack"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"detail": "Internal server error", "type": "server_error"})
        );
        assert!(!body.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn test_malformed_cache_entry_is_500() {
        let cache = MockCache::new().with_raw_entry(
            "search_query:jack",
            "not json",
            Duration::from_secs(3600),
        );
        let app = app_with(Arc::new(cache));

        let response = app
            .oneshot(search_request("/search/", r#"{"query":"jack"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_missing_query_is_422() {
        let cache = Arc::new(MockCache::new());
        let app = app_with(cache.clone());

        let response = app
            .oneshot(search_request("/search/", r#"{"q":"jack"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["type"], "invalid_request_error");
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = app_with(Arc::new(MockCache::new()));

        let response = app
            .oneshot(search_request("/search/", r#"{"query": "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_every_listed_route_is_served() {
        let app = app_with(Arc::new(MockCache::new()));

        for path in ROUTES {
            let request = if path.starts_with(SEARCH_PATH_NO_SLASH) {
                search_request(path, r#"{"query":"jack"}"#)
            } else {
                Request::builder().uri(*path).body(Body::empty()).unwrap()
            };

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn test_root_message() {
        let app = app_with(Arc::new(MockCache::new()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], health::ROOT_MESSAGE);
    }

    #[tokio::test]
    async fn test_ready_reports_cache_failure() {
        let app = app_with(Arc::new(MockCache::new().with_error("timed out")));

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["checks"][0]["status"], "healthy");
        assert_eq!(body["checks"][1]["name"], "cache");
        assert_eq!(body["checks"][1]["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_ready_when_dependencies_up() {
        let app = app_with(Arc::new(MockCache::new()));

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = app_with(Arc::new(MockCache::new()));

        let response = app
            .oneshot(Request::builder().uri("/games").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "Not Found");
    }
}
