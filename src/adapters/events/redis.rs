//! Redis-backed event publisher for multi-node deployments.
//!
//! Envelopes are serialized to JSON and PUBLISHed on a channel derived from
//! the event type, e.g. `driftpad:session.deleted`. Subscribers pick the
//! channels they care about; delivery is Redis pub/sub semantics
//! (at-most-once per connected subscriber, no replay).

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{EventEnvelope, PublishError};
use crate::ports::EventPublisher;

/// Channel prefix applied to every event type.
const CHANNEL_PREFIX: &str = "driftpad";

/// Redis pub/sub publisher.
#[derive(Clone)]
pub struct RedisEventPublisher {
    conn: MultiplexedConnection,
}

impl RedisEventPublisher {
    /// Wraps an existing multiplexed connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Connects to the given Redis URL.
    pub async fn connect(url: &str) -> Result<Self, PublishError> {
        let client = redis::Client::open(url)
            .map_err(|e| PublishError::transport(e.to_string()))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| PublishError::transport(e.to_string()))?;
        Ok(Self::new(conn))
    }

    fn channel_for(event_type: &str) -> String {
        format!("{}:{}", CHANNEL_PREFIX, event_type)
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError> {
        let channel = Self::channel_for(&event.event_type);
        let payload = serde_json::to_string(&event)
            .map_err(|e| PublishError::transport(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(channel, payload)
            .await
            .map_err(|e| PublishError::transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_includes_prefix_and_event_type() {
        assert_eq!(
            RedisEventPublisher::channel_for("session.deleted"),
            "driftpad:session.deleted"
        );
    }
}
