//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, DatabaseConfig, LogFormat, LoggingConfig, MAX_CACHE_TTL_SECS,
    MetricsConfig, SearchConfig, ServerConfig,
};
