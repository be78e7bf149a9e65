//! Cleanup job configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Cleanup job configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    /// Sessions older than this many hours are deleted
    #[serde(default = "default_retention_hours")]
    pub retention_hours: i64,

    /// Seconds between cleanup runs
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl CleanupConfig {
    /// Validate cleanup configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retention_hours < 1 {
            return Err(ValidationError::InvalidRetention);
        }
        if self.interval_secs < 1 {
            return Err(ValidationError::InvalidInterval);
        }
        Ok(())
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            retention_hours: default_retention_hours(),
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_retention_hours() -> i64 {
    24
}

fn default_interval_secs() -> u64 {
    3600
}
