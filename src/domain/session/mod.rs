//! Session domain module.
//!
//! Sessions are the shareable unit of collaboration: a mutable content
//! document plus attachments referenced by id. They are ephemeral — any
//! session older than the retention window is eligible for deletion
//! regardless of its content state.
//!
//! # Events
//!
//! - `SessionCreated` - Published when a new session is created
//! - `SessionUpdated` - Published when session content changes
//! - `SessionDeleted` - Published when a session is deleted (explicitly or by
//!   the cleanup job)

mod aggregate;
mod events;

pub use aggregate::Session;
pub use events::{SessionCreated, SessionDeleted, SessionUpdated};
