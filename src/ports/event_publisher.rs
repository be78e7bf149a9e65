//! EventPublisher port - interface for publishing lifecycle events.
//!
//! The core publishes without knowing the underlying transport (in-memory,
//! Redis). Routing is by the envelope's `event_type`.

use async_trait::async_trait;

use crate::domain::foundation::{EventEnvelope, PublishError};

/// Port for publishing lifecycle events.
///
/// Delivery is at-least-once and unordered with respect to other publishers;
/// the core never waits for subscriber acknowledgment.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError>;
}
