//! Search domain - entities, query patterns and repository port

mod entity;
mod pattern;
mod repository;

pub use entity::{CachedSearch, Game, GameId, Provider, ProviderId, SearchQuery, SearchResult};
pub use pattern::LikePattern;
pub use repository::SearchRepository;

#[cfg(test)]
pub use repository::MockSearchRepository;
