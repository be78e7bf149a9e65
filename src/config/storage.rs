//! Blob storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Blob storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding attachment blobs
    #[serde(default = "default_blob_path")]
    pub blob_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            blob_path: default_blob_path(),
        }
    }
}

fn default_blob_path() -> PathBuf {
    PathBuf::from("./data/blobs")
}
