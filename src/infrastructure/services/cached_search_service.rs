//! Cache-aside wrapper around the search service

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::SearchConfig;
use crate::domain::DomainError;
use crate::domain::cache::{Cache, CacheExt, CacheKey, NamespacedKey};
use crate::domain::search::{CachedSearch, SearchResult};
use crate::infrastructure::observability::record_cache_lookup;

use super::search_service::SearchQueryService;

/// Configuration for search result caching
#[derive(Debug, Clone)]
pub struct SearchCacheConfig {
    /// Namespace prefix for cache keys
    pub namespace: String,
    /// Absolute lifetime of an entry from its write
    pub ttl: Duration,
}

impl Default for SearchCacheConfig {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchCacheConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            namespace: config.cache_namespace.clone(),
            ttl: config.cache_ttl(),
        }
    }
}

impl SearchCacheConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Read-through cache over [`SearchQueryService`]
///
/// There is no request coalescing: concurrent misses on the same key each
/// query the database and each write the entry, last writer wins.
#[derive(Debug, Clone)]
pub struct CachedSearchService {
    cache: Arc<dyn Cache>,
    search: SearchQueryService,
    config: SearchCacheConfig,
}

impl CachedSearchService {
    pub fn new(cache: Arc<dyn Cache>, search: SearchQueryService) -> Self {
        Self::with_config(cache, search, SearchCacheConfig::default())
    }

    pub fn with_config(
        cache: Arc<dyn Cache>,
        search: SearchQueryService,
        config: SearchCacheConfig,
    ) -> Self {
        Self {
            cache,
            search,
            config,
        }
    }

    /// `{namespace}:{query}`, with the query taken verbatim
    pub fn cache_key(&self, query: &str) -> NamespacedKey {
        NamespacedKey::new(&self.config.namespace, query)
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    pub fn query_service(&self) -> &SearchQueryService {
        &self.search
    }

    /// Returns the cached result for `query`, or searches and caches it
    ///
    /// A cached payload that no longer decodes is an error, not a miss.
    pub async fn get_or_compute(&self, query: &str) -> Result<CachedSearch, DomainError> {
        let key = self.cache_key(query);

        if let Some(result) = self.cache.get::<SearchResult>(key.as_str()).await? {
            info!(key = %key, "Cache hit for key");
            record_cache_lookup(true);

            return Ok(CachedSearch {
                result,
                from_cache: true,
            });
        }

        info!(key = %key, "Cache miss for key");
        record_cache_lookup(false);

        let result = self.search.search(query).await?;
        self.cache.set(key.as_str(), &result, self.config.ttl).await?;

        Ok(CachedSearch {
            result,
            from_cache: false,
        })
    }
}
