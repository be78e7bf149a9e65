//! Redis pub/sub configuration

use serde::Deserialize;

/// Redis pub/sub configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379`
    pub url: String,
}
