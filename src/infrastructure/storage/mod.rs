//! Storage infrastructure - Search repository implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemorySearchRepository;
pub use postgres::{PostgresConfig, PostgresSearchRepository};
