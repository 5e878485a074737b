//! Game Search API
//!
//! Case-insensitive substring search over games and providers with:
//! - PostgreSQL lookups through a lazily connected pool
//! - Cache-aside results in Redis (or an in-process moka cache)
//! - Layered configuration, structured logging and Prometheus metrics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::cache::Cache;
use domain::search::SearchRepository;
use infrastructure::cache::CacheFactory;
use infrastructure::services::{CachedSearchService, SearchCacheConfig, SearchQueryService};
use infrastructure::storage::{PostgresConfig, PostgresSearchRepository};
use sqlx::PgPool;
use tracing::info;

/// Handles built at startup and released at shutdown
pub struct AppResources {
    pub state: AppState,
    pub pool: PgPool,
    pub cache: Arc<dyn Cache>,
}

impl AppResources {
    /// Closes the pool and drops the cache connection
    pub async fn shutdown(self) {
        info!("Closing PostgreSQL pool");
        self.pool.close().await;

        info!(backend = self.cache.backend(), "Closing cache connection");
        drop(self.state);
        drop(self.cache);

        info!("Resources released");
    }
}

/// Builds stores and services from configuration
///
/// The cache is pinged here and an unreachable cache fails startup. The
/// PostgreSQL pool is lazy and connects on first use.
pub async fn create_app_resources(config: &AppConfig) -> anyhow::Result<AppResources> {
    info!(backend = %config.cache.backend, "Connecting to cache");
    let cache = CacheFactory::new().create(&config.cache).await?;
    cache.ping().await?;
    info!(backend = cache.backend(), "Cache connection established");

    let pool = PostgresConfig::from(&config.database).connect_lazy()?;
    info!(
        max_connections = config.database.max_connections(),
        "PostgreSQL pool created"
    );

    let repository: Arc<dyn SearchRepository> =
        Arc::new(PostgresSearchRepository::new(pool.clone()));

    let state = create_app_state(config, repository, cache.clone());

    Ok(AppResources { state, pool, cache })
}

/// Wires the search services over already-built stores
pub fn create_app_state(
    config: &AppConfig,
    repository: Arc<dyn SearchRepository>,
    cache: Arc<dyn Cache>,
) -> AppState {
    let query_service = SearchQueryService::new(repository)
        .with_escape_wildcards(config.search.escape_wildcards);

    if !config.search.escape_wildcards {
        tracing::warn!("Wildcard escaping disabled: '%' and '_' in queries act as LIKE wildcards");
    }

    let service = CachedSearchService::with_config(
        cache,
        query_service,
        SearchCacheConfig::from(&config.search),
    );

    AppState::from_service(service)
}
