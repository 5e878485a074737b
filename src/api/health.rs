//! Root and health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::{Json, RootResponse};
use crate::domain::DomainError;

use super::state::AppState;

pub const ROOT_MESSAGE: &str = "Game search API: Axum + PostgreSQL + Redis";

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl HealthCheck {
    fn from_ping(name: &str, outcome: Result<(), DomainError>, start: Instant) -> Self {
        let latency_ms = Some(start.elapsed().as_millis() as u64);

        match outcome {
            Ok(()) => Self {
                name: name.to_string(),
                status: HealthStatus::Healthy,
                message: None,
                latency_ms,
            },
            Err(e) => {
                tracing::warn!(component = name, error = %e, "Readiness check failed");
                Self {
                    name: name.to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some(format!("{} unavailable", e.kind())),
                    latency_ms,
                }
            }
        }
    }
}

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Returns 200 while the process is serving
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Pings the database and the cache; 503 if either fails
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let database = async {
        let start = Instant::now();
        HealthCheck::from_ping("database", state.repository.ping().await, start)
    };
    let cache = async {
        let start = Instant::now();
        HealthCheck::from_ping("cache", state.cache.ping().await, start)
    };
    let (database, cache) = tokio::join!(database, cache);

    let checks = vec![database, cache];
    let overall_status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
