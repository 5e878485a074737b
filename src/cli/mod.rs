//! CLI module for the game search service
//!
//! Subcommands:
//! - `serve`: run the HTTP API (default)
//! - `check`: ping the database and cache, then exit

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Game search - substring search over games and providers with a result cache
#[derive(Parser)]
#[command(name = "game-search")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API
    Serve,

    /// Check connectivity to the database and cache
    Check,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

/// Loads `.env`, configuration and logging shared by every subcommand
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to read .env file");
        }
    }

    Ok(config)
}
