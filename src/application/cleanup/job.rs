//! The cleanup job.
//!
//! One run executes two sequential phases:
//!
//! 1. **Session expiry** - delete every session older than the retention
//!    window in one batch, then publish one `session.deleted` event per
//!    matched id.
//! 2. **Orphan reclamation** - delete every attachment whose owning session
//!    no longer exists, then delete each backing blob that is still present.
//!
//! The phases are not transactional across each other: an interrupted run
//! leaves whatever completed, and the next run picks up the remainder. Any
//! repository or storage failure aborts the whole run; publish failures do
//! not (event delivery is advisory to live clients).

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{
    AttachmentId, RepositoryError, SerializableDomainEvent, SessionId, Timestamp,
};
use crate::domain::session::SessionDeleted;
use crate::ports::{
    AttachmentRepository, BlobStorage, EventPublisher, SessionRepository, StorageError,
};

/// Sessions older than this are eligible for deletion.
pub const DEFAULT_RETENTION_HOURS: i64 = 24;

/// Errors that abort a cleanup run.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Counts reported by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub sessions_removed: u64,
    pub attachments_removed: u64,
}

/// Periodic garbage collector for sessions, attachments, and blobs.
pub struct CleanupJob {
    sessions: Arc<dyn SessionRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    blobs: Arc<dyn BlobStorage>,
    publisher: Arc<dyn EventPublisher>,
    retention_hours: i64,
}

impl CleanupJob {
    /// Creates a job with the default retention window.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        blobs: Arc<dyn BlobStorage>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            attachments,
            blobs,
            publisher,
            retention_hours: DEFAULT_RETENTION_HOURS,
        }
    }

    /// Overrides the retention window.
    pub fn with_retention_hours(mut self, hours: i64) -> Self {
        self.retention_hours = hours;
        self
    }

    /// Executes one full run: session expiry, then orphan reclamation.
    pub async fn run(&self) -> Result<CleanupReport, CleanupError> {
        let sessions_removed = self.expire_sessions().await?;
        let attachments_removed = self.reclaim_orphans().await?;
        Ok(CleanupReport {
            sessions_removed,
            attachments_removed,
        })
    }

    async fn expire_sessions(&self) -> Result<u64, CleanupError> {
        tracing::info!("cleanup: deleting expired sessions");
        let cutoff = Timestamp::now().minus_hours(self.retention_hours);
        let expired = self.sessions.find_before(cutoff).await?;
        let ids: Vec<SessionId> = expired.iter().map(|s| s.id().clone()).collect();

        let removed = self.sessions.delete_many(&ids).await?;

        // One event per matched id, after the batch delete has returned.
        // The matched set is authoritative here, not the delete call's count.
        for id in &ids {
            let event = SessionDeleted::now(id.clone());
            if let Err(err) = self.publisher.publish(event.to_envelope()).await {
                tracing::warn!(session_id = %id, error = %err, "cleanup: session.deleted publish failed, continuing");
            }
        }

        tracing::info!(removed, "cleanup: deleted expired session(s)");
        Ok(removed)
    }

    async fn reclaim_orphans(&self) -> Result<u64, CleanupError> {
        tracing::info!("cleanup: deleting orphan attachments");
        let orphans = self.attachments.find_orphans().await?;
        let ids: Vec<AttachmentId> = orphans.iter().map(|a| a.id.clone()).collect();

        let removed = self.attachments.delete_many(&ids).await?;

        for id in &ids {
            if !self.blobs.exists(id).await? {
                continue;
            }
            self.blobs.delete(id).await?;
        }

        tracing::info!(removed, "cleanup: deleted orphan attachment(s)");
        Ok(removed)
    }
}
