//! In-memory cache implementation using moka

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache as MokaCache;

use crate::domain::DomainError;
use crate::domain::cache::Cache;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    ttl: Duration,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: String, ttl: Duration) -> Result<Self, DomainError> {
        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            DomainError::cache(format!("TTL of {:?} is out of range", ttl))
        })?;

        Ok(Self {
            data,
            ttl,
            expires_at,
        })
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Evicts each entry once its own TTL elapses, measured from the write
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local cache for running without Redis
///
/// Moka evicts expired entries lazily, so reads also check the stored
/// deadline to keep expiry exact.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
    config: InMemoryCacheConfig,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache, config }
    }

    pub fn max_capacity(&self) -> u64 {
        self.config.max_capacity
    }

    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.cache.get(key).await?;

        if entry.is_expired() {
            self.cache.remove(key).await;
            return None;
        }

        Some(entry)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.live_entry(key).await.map(|entry| entry.data))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        self.cache
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl)?)
            .await;
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        Ok(self
            .live_entry(key)
            .await
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now())))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"value1", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_is_error() {
        let cache = InMemoryCache::new();

        let result = cache
            .set_raw("key1", "\"value1\"", Duration::from_secs(u64::MAX))
            .await;

        assert!(matches!(result, Err(DomainError::Cache { .. })));
        assert!(cache.get_raw("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryCache::new();

        let result: Option<String> = cache.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"value1", Duration::from_millis(50))
            .await
            .unwrap();

        assert!(cache.get_raw("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert!(result.is_none());
        assert!(cache.ttl("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ttl_remaining() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"value1", Duration::from_secs(3600))
            .await
            .unwrap();

        let remaining = cache.ttl("key1").await.unwrap().unwrap();
        assert!(remaining.as_secs() > 3590 && remaining.as_secs() <= 3600);
    }

    #[tokio::test]
    async fn test_overwrite_resets_ttl() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"old", Duration::from_millis(50))
            .await
            .unwrap();
        cache
            .set("key1", &"new", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_ping_and_backend() {
        let cache = InMemoryCache::with_config(InMemoryCacheConfig::default().with_max_capacity(5));

        cache.ping().await.unwrap();
        assert_eq!(cache.backend(), "in_memory");
        assert_eq!(cache.max_capacity(), 5);
    }
}
