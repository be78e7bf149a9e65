//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `DRIFTPAD` prefix
//! and `__` (double underscore) separating nested keys, e.g.
//! `DRIFTPAD__SERVER__PORT=8080` -> `server.port = 8080`.

mod cleanup;
mod error;
mod redis;
mod server;
mod storage;

pub use cleanup::CleanupConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, timeouts).
    #[serde(default)]
    pub server: ServerConfig,

    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cleanup job configuration.
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Redis pub/sub configuration. When absent, lifecycle events stay on
    /// the in-process bus.
    #[serde(default)]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if one is present (development), then reads
    /// `DRIFTPAD`-prefixed variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DRIFTPAD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any value is semantically invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.cleanup.validate()?;
        Ok(())
    }
}
