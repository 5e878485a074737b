//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::sync::LazyLock;
use std::time::Duration;

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use regex::Regex;

use crate::config::MetricsConfig;
use crate::domain::DomainError;

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("static regex is valid"));

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global Prometheus recorder
///
/// Without a recorder the `metrics` macros are no-ops, so callers that skip
/// this (tests, `check`) still run the same code paths. `reserved` lists the
/// routes the metrics path must not shadow.
pub fn init_metrics(
    config: &MetricsConfig,
    reserved: &[&str],
) -> Result<Option<PrometheusMetrics>, DomainError> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return Ok(None);
    }

    validate_metrics_path(&config.path, reserved)?;

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("game_search_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Ok(Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            Ok(None)
        }
    }
}

/// The path must be absolute and free of any route already served
fn validate_metrics_path(path: &str, reserved: &[&str]) -> Result<(), DomainError> {
    if !path.starts_with('/') {
        return Err(DomainError::configuration(format!(
            "metrics.path must start with '/', got '{}'",
            path
        )));
    }

    if reserved.contains(&path) {
        return Err(DomainError::configuration(format!(
            "metrics.path '{}' collides with an API route",
            path
        )));
    }

    Ok(())
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record a search cache lookup
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("search_cache_lookups_total", "result" => result).increment(1);
}

/// Record a database search round
pub fn record_search_query(duration: Duration, success: bool) {
    let status = if success { "success" } else { "error" };
    histogram!("search_query_duration_seconds", "status" => status)
        .record(duration.as_secs_f64());
}

/// Sanitize URL path for metric labels (limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = NUMERIC_SEGMENT.replace_all(path, "/{id}$1");

    if path.len() > 50 {
        path.chars().take(50).collect()
    } else {
        path.to_string()
    }
}
