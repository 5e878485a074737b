//! Structured logging setup

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

/// `RUST_LOG` wins over the configured level when set
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, DomainError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid log level '{}': {}",
                config.level, e
            ))
        }),
    }
}

/// Installs the global subscriber; fails if one is already set
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = build_filter(config)?;

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    installed.map_err(|e| {
        DomainError::configuration(format!("Failed to install log subscriber: {}", e))
    })?;

    tracing::info!(
        level = %config.level,
        format = ?config.format,
        "Logging initialized"
    );

    Ok(())
}
