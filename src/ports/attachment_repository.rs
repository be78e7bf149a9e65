//! Attachment repository port.

use async_trait::async_trait;

use crate::domain::attachment::Attachment;
use crate::domain::foundation::{AttachmentId, RepositoryError, SessionId};

/// Repository port for attachment records.
///
/// Orphan detection is the repository's responsibility: an attachment is an
/// orphan when its owning session no longer exists in the session store the
/// implementation is paired with.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Persist a new attachment record.
    async fn save(&self, attachment: &Attachment) -> Result<(), RepositoryError>;

    /// Fetch an attachment by id.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if no attachment has this id
    async fn get(&self, id: &AttachmentId) -> Result<Attachment, RepositoryError>;

    /// List attachments belonging to a session.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Attachment>, RepositoryError>;

    /// Find attachments whose owning session no longer exists.
    async fn find_orphans(&self) -> Result<Vec<Attachment>, RepositoryError>;

    /// Delete the given attachments in one batch. Ids that don't exist are
    /// skipped; returns the number of records actually removed.
    async fn delete_many(&self, ids: &[AttachmentId]) -> Result<u64, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AttachmentRepository) {}
    }
}
