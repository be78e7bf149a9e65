//! HTTP DTOs for session endpoints.
//!
//! These types decouple the wire shapes from domain types.

use serde::Serialize;

use crate::domain::attachment::Attachment;
use crate::domain::session::Session;

/// Session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            content: session.content().to_string(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Attachment metadata for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub id: String,
    pub session_id: String,
    pub name: String,
    pub content_type: String,
    pub created_at: String,
}

impl From<&Attachment> for AttachmentResponse {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id.to_string(),
            session_id: attachment.session_id.to_string(),
            name: attachment.name.clone(),
            content_type: attachment.content_type.clone(),
            created_at: attachment.created_at.to_rfc3339(),
        }
    }
}
