//! In-memory blob storage for tests.
//!
//! Records every delete call so tests can assert on cascade behavior.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::foundation::AttachmentId;
use crate::ports::{BlobStorage, StorageError};

/// Map-backed blob store with call tracking for assertions.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned. Acceptable for test code;
/// production deployments use [`super::LocalBlobStorage`].
#[derive(Default)]
pub struct InMemoryBlobStorage {
    blobs: RwLock<HashMap<AttachmentId, Bytes>>,
    deleted: RwLock<Vec<AttachmentId>>,
}

impl InMemoryBlobStorage {
    /// Creates an empty blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids passed to `delete` so far, in call order (for test assertions).
    pub fn deleted_keys(&self) -> Vec<AttachmentId> {
        self.deleted
            .read()
            .expect("InMemoryBlobStorage: deleted lock poisoned")
            .clone()
    }

    /// Number of stored blobs (for test assertions).
    pub fn blob_count(&self) -> usize {
        self.blobs
            .read()
            .expect("InMemoryBlobStorage: blobs lock poisoned")
            .len()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn write(&self, id: &AttachmentId, data: Bytes) -> Result<(), StorageError> {
        self.blobs
            .write()
            .expect("InMemoryBlobStorage: blobs lock poisoned")
            .insert(id.clone(), data);
        Ok(())
    }

    async fn read(&self, id: &AttachmentId) -> Result<Bytes, StorageError> {
        self.blobs
            .read()
            .expect("InMemoryBlobStorage: blobs lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(id.as_str()))
    }

    async fn exists(&self, id: &AttachmentId) -> Result<bool, StorageError> {
        Ok(self
            .blobs
            .read()
            .expect("InMemoryBlobStorage: blobs lock poisoned")
            .contains_key(id))
    }

    async fn delete(&self, id: &AttachmentId) -> Result<(), StorageError> {
        self.deleted
            .write()
            .expect("InMemoryBlobStorage: deleted lock poisoned")
            .push(id.clone());
        self.blobs
            .write()
            .expect("InMemoryBlobStorage: blobs lock poisoned")
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(id.as_str()))
    }
}
