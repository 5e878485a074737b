//! Searchable entities and search results

use serde::{Deserialize, Serialize};

use super::pattern::LikePattern;

pub type GameId = i64;
pub type ProviderId = i64;

/// A row of the `games` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub title: String,
}

impl Game {
    pub fn new(id: GameId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A row of the `providers` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
}

impl Provider {
    pub fn new(id: ProviderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Identifiers of the games and providers matching a query, in store order
///
/// This is also the cache payload: `{"games":[..],"providers":[..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub games: Vec<GameId>,
    pub providers: Vec<ProviderId>,
}

impl SearchResult {
    pub fn new(games: Vec<GameId>, providers: Vec<ProviderId>) -> Self {
        Self { games, providers }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.providers.is_empty()
    }
}

/// A search result plus whether it was served from the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSearch {
    pub result: SearchResult,
    pub from_cache: bool,
}

/// A user query together with the pattern it compiles to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    pattern: LikePattern,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, escape_wildcards: bool) -> Self {
        let text = text.into();
        let pattern = LikePattern::contains(&text, escape_wildcards);

        Self { text, pattern }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pattern(&self) -> &LikePattern {
        &self.pattern
    }
}
