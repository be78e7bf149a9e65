//! Local filesystem blob storage.
//!
//! One file per attachment id under a base directory. Writes go through a
//! temp-file + rename so a crash mid-write never leaves a partial blob.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::AttachmentId;
use crate::ports::{BlobStorage, StorageError};

/// Filesystem-backed blob store.
///
/// # Directory Structure
///
/// ```text
/// {base_path}/
/// ├── blob_{attachment_id}
/// └── blob_{attachment_id}
/// ```
#[derive(Debug, Clone)]
pub struct LocalBlobStorage {
    base_path: PathBuf,
}

impl LocalBlobStorage {
    /// Creates a blob store rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn blob_path(&self, id: &AttachmentId) -> PathBuf {
        self.base_path.join(format!("blob_{}", id.as_str()))
    }

    fn temp_path(&self, id: &AttachmentId) -> PathBuf {
        self.base_path.join(format!("blob_{}.tmp", id.as_str()))
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn write(&self, id: &AttachmentId, data: Bytes) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await?;

        let temp = self.temp_path(id);
        let mut file = fs::File::create(&temp).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp, self.blob_path(id)).await?;
        Ok(())
    }

    async fn read(&self, id: &AttachmentId) -> Result<Bytes, StorageError> {
        match fs::read(self.blob_path(id)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(id.as_str()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, id: &AttachmentId) -> Result<bool, StorageError> {
        match fs::metadata(self.blob_path(id)).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: &AttachmentId) -> Result<(), StorageError> {
        match fs::remove_file(self.blob_path(id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(id.as_str()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
