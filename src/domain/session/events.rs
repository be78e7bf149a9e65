//! Session lifecycle events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEvent, SessionId, Timestamp};

/// Published when a new session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub created_at: Timestamp,
}

impl DomainEvent for SessionCreated {
    fn event_type(&self) -> &'static str {
        "session.created"
    }

    fn entity_kind(&self) -> &'static str {
        "session"
    }

    fn entity_id(&self) -> String {
        self.session_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Published when session content is replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdated {
    pub session_id: SessionId,
    pub updated_at: Timestamp,
}

impl DomainEvent for SessionUpdated {
    fn event_type(&self) -> &'static str {
        "session.updated"
    }

    fn entity_kind(&self) -> &'static str {
        "session"
    }

    fn entity_id(&self) -> String {
        self.session_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// Published once per session removed, whether by an explicit delete request
/// or by the cleanup job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDeleted {
    pub session_id: SessionId,
    pub deleted_at: Timestamp,
}

impl SessionDeleted {
    /// Creates a deletion event stamped with the current time.
    pub fn now(session_id: SessionId) -> Self {
        Self {
            session_id,
            deleted_at: Timestamp::now(),
        }
    }
}

impl DomainEvent for SessionDeleted {
    fn event_type(&self) -> &'static str {
        "session.deleted"
    }

    fn entity_kind(&self) -> &'static str {
        "session"
    }

    fn entity_id(&self) -> String {
        self.session_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.deleted_at
    }
}
