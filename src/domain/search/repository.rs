//! Search repository trait

use async_trait::async_trait;

use super::entity::{GameId, ProviderId};
use super::pattern::LikePattern;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read-only lookups over the `games` and `providers` tables
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Ids of games whose title matches the pattern, in store order
    async fn find_game_ids(&self, pattern: &LikePattern) -> Result<Vec<GameId>, DomainError>;

    /// Ids of providers whose name matches the pattern, in store order
    async fn find_provider_ids(
        &self,
        pattern: &LikePattern,
    ) -> Result<Vec<ProviderId>, DomainError>;

    /// Round-trips to the backing store
    async fn ping(&self) -> Result<(), DomainError>;
}
