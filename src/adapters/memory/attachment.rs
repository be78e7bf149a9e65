//! In-memory attachment repository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::attachment::Attachment;
use crate::domain::foundation::{AttachmentId, RepositoryError, SessionId};
use crate::ports::AttachmentRepository;

use super::{InMemorySessionRepository, SessionMap};

/// Process-local attachment store, paired with a session store for orphan
/// detection.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned.
pub struct InMemoryAttachmentRepository {
    attachments: RwLock<HashMap<AttachmentId, Attachment>>,
    sessions: SessionMap,
}

impl InMemoryAttachmentRepository {
    /// Creates an attachment store that detects orphans against the given
    /// session store.
    pub fn paired_with(sessions: &InMemorySessionRepository) -> Self {
        Self {
            attachments: RwLock::new(HashMap::new()),
            sessions: sessions.map(),
        }
    }

    /// Number of stored attachments (for test assertions).
    pub fn attachment_count(&self) -> usize {
        self.attachments
            .read()
            .expect("InMemoryAttachmentRepository: lock poisoned")
            .len()
    }

    /// True if an attachment with the given id is stored (for test
    /// assertions).
    pub fn contains(&self, id: &AttachmentId) -> bool {
        self.attachments
            .read()
            .expect("InMemoryAttachmentRepository: lock poisoned")
            .contains_key(id)
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn save(&self, attachment: &Attachment) -> Result<(), RepositoryError> {
        let mut attachments = self
            .attachments
            .write()
            .expect("InMemoryAttachmentRepository: lock poisoned");
        if attachments.contains_key(&attachment.id) {
            return Err(RepositoryError::backend(format!(
                "attachment id already taken: {}",
                attachment.id
            )));
        }
        attachments.insert(attachment.id.clone(), attachment.clone());
        Ok(())
    }

    async fn get(&self, id: &AttachmentId) -> Result<Attachment, RepositoryError> {
        self.attachments
            .read()
            .expect("InMemoryAttachmentRepository: lock poisoned")
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Attachment>, RepositoryError> {
        Ok(self
            .attachments
            .read()
            .expect("InMemoryAttachmentRepository: lock poisoned")
            .values()
            .filter(|a| &a.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn find_orphans(&self) -> Result<Vec<Attachment>, RepositoryError> {
        let live_sessions = self
            .sessions
            .read()
            .expect("InMemoryAttachmentRepository: session lock poisoned")
            .keys()
            .cloned()
            .collect::<std::collections::HashSet<_>>();

        Ok(self
            .attachments
            .read()
            .expect("InMemoryAttachmentRepository: lock poisoned")
            .values()
            .filter(|a| !live_sessions.contains(&a.session_id))
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[AttachmentId]) -> Result<u64, RepositoryError> {
        let mut attachments = self
            .attachments
            .write()
            .expect("InMemoryAttachmentRepository: lock poisoned");
        let mut removed = 0;
        for id in ids {
            if attachments.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Session;
    use crate::ports::SessionRepository;

    fn attachment(id: &str, session_id: &str) -> Attachment {
        Attachment::new(
            AttachmentId::new(id).unwrap(),
            SessionId::new(session_id).unwrap(),
            "file.bin",
            "application/octet-stream",
        )
    }

    #[tokio::test]
    async fn find_by_session_filters_on_owner() {
        let sessions = InMemorySessionRepository::new();
        let repo = InMemoryAttachmentRepository::paired_with(&sessions);

        repo.save(&attachment("a1", "s1")).await.unwrap();
        repo.save(&attachment("a2", "s2")).await.unwrap();

        let found = repo
            .find_by_session(&SessionId::new("s1").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "a1");
    }

    #[tokio::test]
    async fn orphans_are_attachments_without_a_live_session() {
        let sessions = InMemorySessionRepository::new();
        let repo = InMemoryAttachmentRepository::paired_with(&sessions);

        let live = Session::new(SessionId::new("live").unwrap(), String::new());
        sessions.save(&live).await.unwrap();

        repo.save(&attachment("kept", "live")).await.unwrap();
        repo.save(&attachment("orphan", "gone")).await.unwrap();

        let orphans = repo.find_orphans().await.unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id.as_str(), "orphan");
    }

    #[tokio::test]
    async fn orphan_detection_observes_session_deletions() {
        let sessions = InMemorySessionRepository::new();
        let repo = InMemoryAttachmentRepository::paired_with(&sessions);

        let s = Session::new(SessionId::new("s1").unwrap(), String::new());
        sessions.save(&s).await.unwrap();
        repo.save(&attachment("a1", "s1")).await.unwrap();

        assert!(repo.find_orphans().await.unwrap().is_empty());

        sessions.delete_many(&[s.id().clone()]).await.unwrap();
        let orphans = repo.find_orphans().await.unwrap();
        assert_eq!(orphans.len(), 1);
    }

    #[tokio::test]
    async fn delete_many_skips_missing_ids() {
        let sessions = InMemorySessionRepository::new();
        let repo = InMemoryAttachmentRepository::paired_with(&sessions);
        repo.save(&attachment("a1", "s1")).await.unwrap();

        let removed = repo
            .delete_many(&[
                AttachmentId::new("a1").unwrap(),
                AttachmentId::new("ghost").unwrap(),
            ])
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(repo.attachment_count(), 0);
    }
}
