//! Check command - pings the database and cache, then exits

use std::time::Instant;

use tracing::{error, info};

use crate::domain::DomainError;

/// Exits with an error if either store is unreachable
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    // Fails here when the cache is down
    let resources = crate::create_app_resources(&config).await?;

    let start = Instant::now();
    let database = resources.state.repository.ping().await;
    report("database", &database, start);

    let start = Instant::now();
    let cache = resources.state.cache.ping().await;
    report("cache", &cache, start);

    resources.shutdown().await;

    database?;
    cache?;

    info!("All dependencies reachable");
    Ok(())
}

fn report(component: &str, outcome: &Result<(), DomainError>, start: Instant) {
    let latency_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(()) => info!(component, latency_ms, "Dependency reachable"),
        Err(e) => error!(component, latency_ms, error = %e, "Dependency unreachable"),
    }
}
