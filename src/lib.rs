//! Driftpad - ephemeral shareable session backend.
//!
//! Sessions are short-lived collaborative documents with attachments, served
//! over a small REST API. Lifecycle changes fan out over a pub/sub bus and a
//! periodic cleanup job reclaims expired sessions, orphaned attachments, and
//! their backing blobs.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
