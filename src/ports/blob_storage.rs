//! Blob storage port - byte storage keyed by attachment id.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::foundation::AttachmentId;

/// Port for attachment blob storage.
///
/// Keys are attachment ids; the record and its bytes share an identifier so
/// the cleanup job can cascade from one to the other.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store a blob, replacing any previous bytes under the same key.
    async fn write(&self, id: &AttachmentId, data: Bytes) -> Result<(), StorageError>;

    /// Read a blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no blob exists under the key.
    async fn read(&self, id: &AttachmentId) -> Result<Bytes, StorageError>;

    /// Check whether a blob exists under the key.
    async fn exists(&self, id: &AttachmentId) -> Result<bool, StorageError>;

    /// Delete a blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no blob exists under the key.
    async fn delete(&self, id: &AttachmentId) -> Result<(), StorageError>;
}

/// Errors that can occur during blob storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// No blob under the given key.
    #[error("blob not found: {key}")]
    NotFound { key: String },

    /// IO error during a storage operation.
    #[error("storage io error: {message}")]
    Io { message: String },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(err.to_string()),
            _ => StorageError::io(err.to_string()),
        }
    }
}
