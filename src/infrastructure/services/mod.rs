//! Infrastructure services

mod cached_search_service;
mod search_service;

pub use cached_search_service::{CachedSearchService, SearchCacheConfig};
pub use search_service::SearchQueryService;
