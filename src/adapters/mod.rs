//! Adapters - implementations of the ports plus the HTTP surface.

pub mod events;
pub mod http;
pub mod memory;
pub mod storage;

// Re-export key types for convenience
pub use events::{InMemoryEventBus, RedisEventPublisher};
pub use memory::{InMemoryAttachmentRepository, InMemorySessionRepository};
pub use storage::{InMemoryBlobStorage, LocalBlobStorage};
