//! Search over the games and providers tables

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::domain::DomainError;
use crate::domain::search::{SearchQuery, SearchRepository, SearchResult};
use crate::infrastructure::observability::record_search_query;

/// Runs one substring lookup per table and assembles the result
#[derive(Clone)]
pub struct SearchQueryService {
    repository: Arc<dyn SearchRepository>,
    escape_wildcards: bool,
}

impl std::fmt::Debug for SearchQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQueryService")
            .field("escape_wildcards", &self.escape_wildcards)
            .finish()
    }
}

impl SearchQueryService {
    pub fn new(repository: Arc<dyn SearchRepository>) -> Self {
        Self {
            repository,
            escape_wildcards: true,
        }
    }

    /// Whether `%` and `_` in user queries are matched literally
    pub fn with_escape_wildcards(mut self, escape: bool) -> Self {
        self.escape_wildcards = escape;
        self
    }

    pub fn repository(&self) -> &Arc<dyn SearchRepository> {
        &self.repository
    }

    /// Finds ids of games and providers whose text contains `query`,
    /// ignoring case. Zero matches is an empty result; either lookup
    /// failing fails the whole search.
    pub async fn search(&self, query: &str) -> Result<SearchResult, DomainError> {
        let query = SearchQuery::new(query, self.escape_wildcards);
        let pattern = query.pattern();
        let start = Instant::now();

        let outcome = tokio::try_join!(
            self.repository.find_game_ids(pattern),
            self.repository.find_provider_ids(pattern),
        );

        record_search_query(start.elapsed(), outcome.is_ok());
        let (games, providers) = outcome?;

        debug!(
            query = %query.text(),
            pattern = %pattern.as_str(),
            games = games.len(),
            providers = providers.len(),
            duration_ms = %start.elapsed().as_millis(),
            "Search completed"
        );

        Ok(SearchResult::new(games, providers))
    }
}
