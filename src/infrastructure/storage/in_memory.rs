//! In-memory search repository

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::search::{
    Game, GameId, LikePattern, Provider, ProviderId, SearchRepository,
};

/// Thread-safe in-memory tables of games and providers
///
/// Matches with the same `ILIKE` semantics as PostgreSQL and returns ids in
/// insertion order. Useful for testing and development.
#[derive(Debug, Default)]
pub struct InMemorySearchRepository {
    games: RwLock<Vec<Game>>,
    providers: RwLock<Vec<Provider>>,
}

impl InMemorySearchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with rows
    pub fn with_entities(games: Vec<Game>, providers: Vec<Provider>) -> Self {
        Self {
            games: RwLock::new(games),
            providers: RwLock::new(providers),
        }
    }

    pub fn insert_game(&self, game: Game) -> Result<(), DomainError> {
        self.games
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?
            .push(game);
        Ok(())
    }

    pub fn insert_provider(&self, provider: Provider) -> Result<(), DomainError> {
        self.providers
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?
            .push(provider);
        Ok(())
    }
}

fn compile(pattern: &LikePattern) -> Result<regex::Regex, DomainError> {
    pattern
        .to_regex()
        .map_err(|e| DomainError::storage(format!("Invalid search pattern: {}", e)))
}

#[async_trait]
impl SearchRepository for InMemorySearchRepository {
    async fn find_game_ids(&self, pattern: &LikePattern) -> Result<Vec<GameId>, DomainError> {
        let matcher = compile(pattern)?;
        let games = self.games.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(games
            .iter()
            .filter(|game| matcher.is_match(&game.title))
            .map(|game| game.id)
            .collect())
    }

    async fn find_provider_ids(
        &self,
        pattern: &LikePattern,
    ) -> Result<Vec<ProviderId>, DomainError> {
        let matcher = compile(pattern)?;
        let providers = self.providers.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(providers
            .iter()
            .filter(|provider| matcher.is_match(&provider.name))
            .map(|provider| provider.id)
            .collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> InMemorySearchRepository {
        InMemorySearchRepository::with_entities(
            vec![
                Game::new(1, "Blackjack Pro"),
                Game::new(2, "European Roulette"),
            ],
            vec![Provider::new(1, "Evolution")],
        )
    }

    #[tokio::test]
    async fn test_find_game_ids() {
        let repo = catalogue();
        let pattern = LikePattern::contains("jack", true);

        assert_eq!(repo.find_game_ids(&pattern).await.unwrap(), vec![1]);
        assert!(repo.find_provider_ids(&pattern).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_letter_matches_both_tables() {
        let repo = catalogue();
        let pattern = LikePattern::contains("E", true);

        assert_eq!(repo.find_game_ids(&pattern).await.unwrap(), vec![2]);
        assert_eq!(repo.find_provider_ids(&pattern).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_insertion_order_is_kept() {
        let repo = InMemorySearchRepository::new();
        repo.insert_game(Game::new(9, "Slots Deluxe")).unwrap();
        repo.insert_game(Game::new(3, "Mega Slots")).unwrap();
        repo.insert_game(Game::new(5, "slots classic")).unwrap();
        repo.insert_provider(Provider::new(4, "Slotmachine Inc")).unwrap();

        let pattern = LikePattern::contains("slot", true);
        assert_eq!(repo.find_game_ids(&pattern).await.unwrap(), vec![9, 3, 5]);
        assert_eq!(repo.find_provider_ids(&pattern).await.unwrap(), vec![4]);
    }

    #[tokio::test]
    async fn test_empty_tables() {
        let repo = InMemorySearchRepository::new();
        let pattern = LikePattern::contains("anything", true);

        assert!(repo.find_game_ids(&pattern).await.unwrap().is_empty());
        assert!(repo.find_provider_ids(&pattern).await.unwrap().is_empty());
        repo.ping().await.unwrap();
    }
}
