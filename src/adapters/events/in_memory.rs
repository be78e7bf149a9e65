//! In-memory event bus.
//!
//! Captures published envelopes for test assertions. Also serves as the
//! publisher when no broker is configured — events are then visible to this
//! process only, which is enough for a single-node deployment.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{EventEnvelope, PublishError};
use crate::ports::EventPublisher;

/// Capturing event bus.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
#[derive(Default)]
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published envelopes (for test assertions).
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: lock poisoned")
            .clone()
    }

    /// Returns envelopes of a specific event type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns count of published envelopes.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: lock poisoned")
            .len()
    }

    /// Clears captured envelopes (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: lock poisoned")
            .clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError> {
        self.published
            .write()
            .expect("InMemoryEventBus: lock poisoned")
            .push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use serde_json::json;

    fn envelope(event_type: &str, entity_id: &str) -> EventEnvelope {
        EventEnvelope {
            entity_kind: "session".to_string(),
            entity_id: entity_id.to_string(),
            event_type: event_type.to_string(),
            payload: json!({ "session_id": entity_id }),
            occurred_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn captures_published_envelopes_in_order() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("session.deleted", "a")).await.unwrap();
        bus.publish(envelope("session.created", "b")).await.unwrap();

        assert_eq!(bus.event_count(), 2);
        assert_eq!(bus.published_events()[0].entity_id, "a");
        assert_eq!(bus.events_of_type("session.deleted").len(), 1);
    }

    #[tokio::test]
    async fn clear_resets_the_capture() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("session.deleted", "a")).await.unwrap();

        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}
