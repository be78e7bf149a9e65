//! Attachment domain module.
//!
//! An attachment belongs to exactly one session and points at a blob in
//! external storage. The attachment id is reused as the storage key. An
//! attachment whose owning session no longer exists is an orphan; orphan
//! status is determined by the repository, not by this type.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttachmentId, SessionId, Timestamp};

/// File attached to a session, backed by a blob in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier; also the blob storage key.
    pub id: AttachmentId,

    /// Owning session.
    pub session_id: SessionId,

    /// Client-supplied display name.
    pub name: String,

    /// Media type recorded at upload time, replayed on download.
    pub content_type: String,

    /// When the attachment was uploaded.
    pub created_at: Timestamp,
}

impl Attachment {
    /// Creates a new attachment record stamped with the current time.
    pub fn new(
        id: AttachmentId,
        session_id: SessionId,
        name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            session_id,
            name: name.into(),
            content_type: content_type.into(),
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_keeps_back_reference_to_session() {
        let att = Attachment::new(
            AttachmentId::new("att1").unwrap(),
            SessionId::new("abc123").unwrap(),
            "notes.txt",
            "text/plain",
        );

        assert_eq!(att.id.as_str(), "att1");
        assert_eq!(att.session_id.as_str(), "abc123");
        assert_eq!(att.content_type, "text/plain");
    }
}
