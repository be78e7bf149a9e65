//! Cleanup service.
//!
//! Reclaims expired sessions and orphaned attachments on a schedule.

mod job;
mod scheduler;

pub use job::{CleanupError, CleanupJob, CleanupReport, DEFAULT_RETENTION_HOURS};
pub use scheduler::{CleanupScheduler, CleanupSchedulerConfig};
