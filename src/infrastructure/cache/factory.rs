//! Cache factory for runtime selection

use std::sync::Arc;

use crate::config::CacheSettings;
use crate::domain::DomainError;
use crate::domain::cache::Cache;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

/// Supported cache types
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CacheType {
    /// In-memory cache using moka
    InMemory,
    /// Redis cache
    #[default]
    Redis,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CacheType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CacheType::InMemory),
            "redis" => Ok(CacheType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache type: {}. Valid types: in_memory, redis",
                s
            ))),
        }
    }
}

/// Factory for creating cache instances
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates the cache selected by `settings.backend`
    ///
    /// For Redis this opens the shared connection, so an unreachable server
    /// fails here rather than on the first request.
    pub async fn create(&self, settings: &CacheSettings) -> Result<Arc<dyn Cache>, DomainError> {
        match settings.backend.parse::<CacheType>()? {
            CacheType::InMemory => Ok(Arc::new(InMemoryCache::with_config(
                InMemoryCacheConfig::default().with_max_capacity(settings.max_capacity),
            ))),
            CacheType::Redis => {
                let cache = RedisCache::new(RedisCacheConfig::new(settings.redis_url())).await?;
                Ok(Arc::new(cache))
            }
        }
    }
}
