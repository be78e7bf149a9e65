//! Session aggregate entity.
//!
//! # Ownership
//!
//! Sessions reference attachments by id but do NOT embed them.
//! Attachment records are managed by the attachment repository.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

/// Shareable collaboration unit with mutable content.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `created_at` never changes after construction; expiry is judged against
///   it, not against `updated_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Current document content. The wire format of the content itself is
    /// opaque to this backend.
    content: String,

    /// When the session was created.
    created_at: Timestamp,

    /// When the content was last replaced.
    updated_at: Timestamp,
}

impl Session {
    /// Creates a new session with the given id and initial content.
    pub fn new(id: SessionId, content: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a session from persistence (no side effects).
    pub fn reconstitute(
        id: SessionId,
        content: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            updated_at,
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the content was last replaced.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces the session content.
    pub fn replace_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Timestamp::now();
    }

    /// True if the session was created before the given cutoff and is
    /// therefore eligible for cleanup.
    pub fn expired_by(&self, cutoff: &Timestamp) -> bool {
        self.created_at.is_before(cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str) -> Session {
        Session::new(SessionId::new(id).unwrap(), "hello".to_string())
    }

    #[test]
    fn new_session_starts_with_equal_timestamps() {
        let s = session("s1");
        assert_eq!(s.created_at(), s.updated_at());
        assert_eq!(s.content(), "hello");
    }

    #[test]
    fn replace_content_bumps_updated_at_only() {
        let mut s = session("s1");
        let created = *s.created_at();

        s.replace_content("world".to_string());

        assert_eq!(s.content(), "world");
        assert_eq!(*s.created_at(), created);
        assert!(s.updated_at() >= s.created_at());
    }

    #[test]
    fn expiry_is_judged_against_creation_time() {
        let old = Session::reconstitute(
            SessionId::new("old").unwrap(),
            String::new(),
            Timestamp::now().minus_hours(30),
            Timestamp::now(),
        );
        let fresh = session("fresh");
        let cutoff = Timestamp::now().minus_hours(24);

        assert!(old.expired_by(&cutoff));
        assert!(!fresh.expired_by(&cutoff));
    }
}
