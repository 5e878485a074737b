//! Search request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::{CachedSearch, SearchResult};

pub const SEARCH_OK: &str = "Search query processed successfully";
pub const SEARCH_OK_FROM_CACHE: &str = "Search query processed successfully (from cache)";

/// `POST /search/` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub message: String,
    pub data: SearchResult,
    /// True when `data` was served from the cache
    pub cache: bool,
}

impl From<CachedSearch> for SearchResponse {
    fn from(found: CachedSearch) -> Self {
        let message = if found.from_cache {
            SEARCH_OK_FROM_CACHE
        } else {
            SEARCH_OK
        };

        Self {
            message: message.to_string(),
            data: found.result,
            cache: found.from_cache,
        }
    }
}

/// `GET /` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}
