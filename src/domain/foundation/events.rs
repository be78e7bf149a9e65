//! Lifecycle event infrastructure.
//!
//! Domain events implement [`DomainEvent`]; serializable events get
//! [`SerializableDomainEvent::to_envelope`] for free through the blanket
//! implementation. Envelopes are transient transport values and are never
//! persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::Timestamp;

/// Trait implemented by all lifecycle events.
pub trait DomainEvent: Send + Sync {
    /// Event type string used for routing (e.g. "session.deleted").
    fn event_type(&self) -> &'static str;

    /// Kind of entity the event concerns (e.g. "session").
    fn entity_kind(&self) -> &'static str;

    /// Identifier of the entity the event concerns.
    fn entity_id(&self) -> String;

    /// When the transition occurred.
    fn occurred_at(&self) -> Timestamp;
}

/// Extension trait providing envelope conversion for serializable events.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Wraps this event in an [`EventEnvelope`] for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            entity_kind: self.entity_kind().to_string(),
            entity_id: self.entity_id(),
            event_type: self.event_type().to_string(),
            payload: serde_json::to_value(self)
                .expect("lifecycle events serialize to plain JSON objects"),
            occurred_at: self.occurred_at(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Transport wrapper for a lifecycle event.
///
/// Created and owned transiently by the publishing component; carries no
/// persisted identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub entity_kind: String,
    pub entity_id: String,
    pub event_type: String,
    pub payload: JsonValue,
    pub occurred_at: Timestamp,
}
