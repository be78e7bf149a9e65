//! Background scheduler for the cleanup job.
//!
//! Runs the job on a fixed interval until the shutdown signal flips. A
//! failed run is logged and retried at the next tick; there is no retry
//! within a run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use super::job::CleanupJob;

/// Configuration for the cleanup scheduler.
#[derive(Debug, Clone)]
pub struct CleanupSchedulerConfig {
    /// How often to run the job. The first run fires immediately on start.
    pub interval: Duration,
}

impl Default for CleanupSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
        }
    }
}

/// Drives [`CleanupJob`] on a timer.
pub struct CleanupScheduler {
    job: Arc<CleanupJob>,
    config: CleanupSchedulerConfig,
}

impl CleanupScheduler {
    /// Creates a scheduler with the default interval.
    pub fn new(job: Arc<CleanupJob>) -> Self {
        Self {
            job,
            config: CleanupSchedulerConfig::default(),
        }
    }

    /// Creates a scheduler with a custom configuration.
    pub fn with_config(job: Arc<CleanupJob>, config: CleanupSchedulerConfig) -> Self {
        Self { job, config }
    }

    /// Runs until the shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("cleanup scheduler stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    match self.job.run().await {
                        Ok(report) => {
                            tracing::debug!(
                                sessions = report.sessions_removed,
                                attachments = report.attachments_removed,
                                "cleanup run complete",
                            );
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "cleanup run failed");
                        }
                    }
                }
            }
        }
    }
}
