//! Application state for shared services

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::domain::search::SearchRepository;
use crate::domain::{CachedSearch, DomainError};
use crate::infrastructure::services::CachedSearchService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<dyn SearchServiceTrait>,
    /// Relational store, held for readiness checks
    pub repository: Arc<dyn SearchRepository>,
    /// Cache store, held for readiness checks
    pub cache: Arc<dyn Cache>,
}

/// Trait for cached search operations
#[async_trait::async_trait]
pub trait SearchServiceTrait: Send + Sync {
    async fn search(&self, query: &str) -> Result<CachedSearch, DomainError>;
}

#[async_trait::async_trait]
impl SearchServiceTrait for CachedSearchService {
    async fn search(&self, query: &str) -> Result<CachedSearch, DomainError> {
        self.get_or_compute(query).await
    }
}

impl AppState {
    pub fn new(
        search_service: Arc<dyn SearchServiceTrait>,
        repository: Arc<dyn SearchRepository>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            search_service,
            repository,
            cache,
        }
    }

    /// Wires a [`CachedSearchService`] over the given stores
    pub fn from_service(service: CachedSearchService) -> Self {
        let repository = service.query_service().repository().clone();
        let cache = service.cache().clone();

        Self::new(Arc::new(service), repository, cache)
    }
}
