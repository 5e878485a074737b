//! Domain layer - Core entities, ports and errors

pub mod cache;
pub mod error;
pub mod search;

pub use cache::{Cache, CacheExt, CacheKey, NamespacedKey};
pub use error::DomainError;
pub use search::{
    CachedSearch, Game, GameId, LikePattern, Provider, ProviderId, SearchQuery, SearchRepository,
    SearchResult,
};
