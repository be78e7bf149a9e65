//! Driftpad server binary.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use driftpad::adapters::http::{app_router, SessionApi};
use driftpad::adapters::{
    InMemoryAttachmentRepository, InMemoryEventBus, InMemorySessionRepository, LocalBlobStorage,
    RedisEventPublisher,
};
use driftpad::application::cleanup::{CleanupJob, CleanupScheduler, CleanupSchedulerConfig};
use driftpad::config::AppConfig;
use driftpad::ports::{AttachmentRepository, BlobStorage, EventPublisher, SessionRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let session_store = Arc::new(InMemorySessionRepository::new());
    let attachment_store = Arc::new(InMemoryAttachmentRepository::paired_with(&session_store));

    let sessions: Arc<dyn SessionRepository> = session_store;
    let attachments: Arc<dyn AttachmentRepository> = attachment_store;
    let blobs: Arc<dyn BlobStorage> = Arc::new(LocalBlobStorage::new(&config.storage.blob_path));

    let publisher: Arc<dyn EventPublisher> = match &config.redis {
        Some(redis) => {
            tracing::info!(url = %redis.url, "publishing lifecycle events to redis");
            Arc::new(RedisEventPublisher::connect(&redis.url).await?)
        }
        None => {
            tracing::info!("no redis configured, lifecycle events stay in-process");
            Arc::new(InMemoryEventBus::new())
        }
    };

    let job = Arc::new(
        CleanupJob::new(
            sessions.clone(),
            attachments.clone(),
            blobs.clone(),
            publisher.clone(),
        )
        .with_retention_hours(config.cleanup.retention_hours),
    );
    let scheduler = CleanupScheduler::with_config(
        job,
        CleanupSchedulerConfig {
            interval: Duration::from_secs(config.cleanup.interval_secs),
        },
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    let api = SessionApi::new(sessions, attachments, blobs, publisher);
    let app = app_router(api, Duration::from_secs(config.server.request_timeout_secs));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "driftpad listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    shutdown_tx.send(true).ok();
    scheduler_handle.await.ok();
    Ok(())
}
