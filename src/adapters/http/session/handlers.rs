//! HTTP handlers for session endpoints.
//!
//! All REST endpoints on a specific session go through [`SessionApi::with_session`]:
//! the session is resolved before any business logic runs, a repository
//! "not found" short-circuits with the fixed 404 envelope, and the business
//! closure receives the session together with a session-scoped logger.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::response::Response;
use http::{header, StatusCode};
use once_cell::sync::Lazy;
use serde_json::Value as JsonValue;

use crate::adapters::http::pipeline::{
    dispatch_raw, dispatch_rest, read_body, HandlerError, RequestLogger,
};
use crate::adapters::http::response::{RawResponse, RestResponse};
use crate::domain::attachment::Attachment;
use crate::domain::foundation::{
    AttachmentId, EventEnvelope, RepositoryError, SerializableDomainEvent, SessionId,
};
use crate::domain::session::{Session, SessionCreated, SessionDeleted, SessionUpdated};
use crate::ports::{AttachmentRepository, BlobStorage, EventPublisher, SessionRepository};

use super::dto::{AttachmentResponse, SessionResponse};

/// Fixed envelope for unresolved session lookups. The raw repository error
/// never reaches the transport layer.
static RES_SESSION_NOT_FOUND: Lazy<RestResponse> = Lazy::new(|| {
    RestResponse::new()
        .with_status_code(StatusCode::NOT_FOUND)
        .with_message("Resource not found")
        .with_error("Session not found")
});

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the session endpoints.
#[derive(Clone)]
pub struct SessionApi {
    sessions: Arc<dyn SessionRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    blobs: Arc<dyn BlobStorage>,
    publisher: Arc<dyn EventPublisher>,
}

impl SessionApi {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        blobs: Arc<dyn BlobStorage>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            attachments,
            blobs,
            publisher,
        }
    }

    /// Resolves the session named by the path parameter and invokes the
    /// business closure with it.
    ///
    /// - unknown or malformed id: short-circuits with the fixed 404 envelope,
    ///   without invoking the closure
    /// - other repository errors: propagated to the generic error path
    /// - closure errors: propagated unchanged, never reinterpreted as 404
    async fn with_session<F, Fut>(
        &self,
        raw_id: &str,
        logger: &RequestLogger,
        handler: F,
    ) -> Result<Option<RestResponse>, HandlerError>
    where
        F: FnOnce(Session, RequestLogger) -> Fut,
        Fut: Future<Output = Result<JsonValue, HandlerError>>,
    {
        let id = match raw_id.parse::<SessionId>() {
            Ok(id) => id,
            Err(_) => return Ok(Some(RES_SESSION_NOT_FOUND.clone())),
        };
        let session = match self.sessions.get(&id).await {
            Ok(session) => session,
            Err(RepositoryError::NotFound) => return Ok(Some(RES_SESSION_NOT_FOUND.clone())),
            Err(err) => return Err(err.into()),
        };

        let logger = logger.for_session(session.id());
        let data = handler(session, logger).await?;
        Ok(Some(RestResponse::with_data(data)))
    }

    /// Publishes a lifecycle event, logging and swallowing transport
    /// failures. Event delivery is advisory to live clients; it never fails
    /// the request that triggered it.
    async fn publish(&self, envelope: EventEnvelope, logger: &RequestLogger) {
        if let Err(err) = self.publisher.publish(envelope).await {
            logger.warn(format!("event publish failed: {err}"));
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a session; the raw body is the initial content.
pub async fn create_session(State(api): State<SessionApi>, req: Request) -> Response {
    dispatch_rest(req, |req, logger| async move {
        let body = read_body(req).await?;
        let content = String::from_utf8_lossy(&body).into_owned();

        let session = Session::new(SessionId::generate(), content);
        api.sessions.save(&session).await?;

        let logger = logger.for_session(session.id());
        let event = SessionCreated {
            session_id: session.id().clone(),
            created_at: *session.created_at(),
        };
        api.publish(event.to_envelope(), &logger).await;
        logger.info("session created");

        Ok(Some(
            RestResponse::with_data(serde_json::to_value(SessionResponse::from(&session))?)
                .with_status_code(StatusCode::CREATED),
        ))
    })
    .await
}

/// GET /api/sessions/:id - Fetch a session.
pub async fn get_session(
    State(api): State<SessionApi>,
    Path(id): Path<String>,
    req: Request,
) -> Response {
    dispatch_rest(req, |_req, logger| async move {
        api.with_session(&id, &logger, |session, _logger| async move {
            Ok(serde_json::to_value(SessionResponse::from(&session))?)
        })
        .await
    })
    .await
}

/// PATCH /api/sessions/:id - Replace session content with the raw body.
pub async fn update_session(
    State(api): State<SessionApi>,
    Path(id): Path<String>,
    req: Request,
) -> Response {
    dispatch_rest(req, |req, logger| async move {
        let repo = api.clone();
        api.with_session(&id, &logger, move |mut session, logger| async move {
            let body = read_body(req).await?;
            session.replace_content(String::from_utf8_lossy(&body).into_owned());
            repo.sessions.update(&session).await?;

            let event = SessionUpdated {
                session_id: session.id().clone(),
                updated_at: *session.updated_at(),
            };
            repo.publish(event.to_envelope(), &logger).await;
            logger.info("session content replaced");

            Ok(serde_json::to_value(SessionResponse::from(&session))?)
        })
        .await
    })
    .await
}

/// DELETE /api/sessions/:id - Delete a session.
///
/// Attachment records are not touched here; they become orphans and are
/// reclaimed by the cleanup job.
pub async fn delete_session(
    State(api): State<SessionApi>,
    Path(id): Path<String>,
    req: Request,
) -> Response {
    dispatch_rest(req, |_req, logger| async move {
        let repo = api.clone();
        api.with_session(&id, &logger, move |session, logger| async move {
            repo.sessions
                .delete_many(std::slice::from_ref(session.id()))
                .await?;

            let event = SessionDeleted::now(session.id().clone());
            repo.publish(event.to_envelope(), &logger).await;
            logger.info("session deleted");

            Ok(serde_json::to_value(SessionResponse::from(&session))?)
        })
        .await
    })
    .await
}

/// POST /api/sessions/:id/attachments - Attach the raw body as a blob.
///
/// Display name comes from the `name` query parameter; the media type is the
/// request's Content-Type and is replayed on download.
pub async fn upload_attachment(
    State(api): State<SessionApi>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    req: Request,
) -> Response {
    dispatch_rest(req, |req, logger| async move {
        let repo = api.clone();
        api.with_session(&id, &logger, move |session, logger| async move {
            let name = params
                .get("name")
                .cloned()
                .unwrap_or_else(|| "attachment".to_string());
            let content_type = req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = read_body(req).await?;

            let attachment = Attachment::new(
                AttachmentId::generate(),
                session.id().clone(),
                name,
                content_type,
            );
            // Record first: a blob write failure then leaves a record whose
            // blob is absent, which the cleanup job tolerates.
            repo.attachments.save(&attachment).await?;
            repo.blobs.write(&attachment.id, data).await?;
            logger.info(format!("attachment {} uploaded", attachment.id));

            Ok(serde_json::to_value(AttachmentResponse::from(&attachment))?)
        })
        .await
    })
    .await
}

/// GET /api/sessions/:id/attachments - List attachment metadata.
pub async fn list_attachments(
    State(api): State<SessionApi>,
    Path(id): Path<String>,
    req: Request,
) -> Response {
    dispatch_rest(req, |_req, logger| async move {
        let repo = api.clone();
        api.with_session(&id, &logger, move |session, _logger| async move {
            let attachments = repo.attachments.find_by_session(session.id()).await?;
            let items: Vec<AttachmentResponse> =
                attachments.iter().map(AttachmentResponse::from).collect();
            Ok(serde_json::to_value(items)?)
        })
        .await
    })
    .await
}

/// GET /api/attachments/:id - Download a blob through the raw pipeline.
pub async fn download_attachment(
    State(api): State<SessionApi>,
    Path(id): Path<String>,
    req: Request,
) -> Response {
    dispatch_raw(req, |_req, logger| async move {
        let id = match id.parse::<AttachmentId>() {
            Ok(id) => id,
            Err(_) => return Ok(Some(attachment_not_found())),
        };
        let attachment = match api.attachments.get(&id).await {
            Ok(attachment) => attachment,
            Err(RepositoryError::NotFound) => return Ok(Some(attachment_not_found())),
            Err(err) => return Err(err.into()),
        };

        let data = api.blobs.read(&id).await?;
        logger.info(format!("attachment {id} served"));

        Ok(Some(
            RawResponse::new()
                .with_content_type(attachment.content_type.clone())
                .with_body(data),
        ))
    })
    .await
}

fn attachment_not_found() -> RawResponse {
    RawResponse::new()
        .with_status(StatusCode::NOT_FOUND)
        .with_body(&b"Attachment not found"[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryAttachmentRepository, InMemorySessionRepository};
    use crate::adapters::storage::InMemoryBlobStorage;
    use crate::domain::foundation::PublishError;
    use async_trait::async_trait;

    fn api() -> (SessionApi, Arc<InMemorySessionRepository>, Arc<InMemoryEventBus>) {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let attachments = Arc::new(InMemoryAttachmentRepository::paired_with(&sessions));
        let blobs = Arc::new(InMemoryBlobStorage::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let api = SessionApi::new(sessions.clone(), attachments, blobs, bus.clone());
        (api, sessions, bus)
    }

    fn logger() -> RequestLogger {
        let req: Request = http::Request::builder()
            .uri("/test")
            .body(axum::body::Body::empty())
            .unwrap();
        RequestLogger::for_request(&req)
    }

    #[tokio::test]
    async fn with_session_short_circuits_on_unknown_id() {
        let (api, _, _) = api();

        let result = api
            .with_session("missing", &logger(), |_session, _logger| async move {
                panic!("business handler must not run for unresolved sessions");
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.status_code(), Some(StatusCode::NOT_FOUND));
        assert_eq!(result.message(), Some("Resource not found"));
        assert_eq!(result.error(), Some("Session not found"));
    }

    #[tokio::test]
    async fn with_session_invokes_handler_with_resolved_session() {
        let (api, sessions, _) = api();
        let session = Session::new(SessionId::new("abc123").unwrap(), "doc".to_string());
        sessions.save(&session).await.unwrap();

        let result = api
            .with_session("abc123", &logger(), |session, _logger| async move {
                Ok(serde_json::json!({ "content": session.content() }))
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.data().unwrap()["content"], "doc");
    }

    #[tokio::test]
    async fn with_session_propagates_backend_errors_unchanged() {
        struct FailingRepo;

        #[async_trait]
        impl SessionRepository for FailingRepo {
            async fn get(&self, _id: &SessionId) -> Result<Session, RepositoryError> {
                Err(RepositoryError::backend("connection refused"))
            }
            async fn save(&self, _session: &Session) -> Result<(), RepositoryError> {
                unreachable!()
            }
            async fn update(&self, _session: &Session) -> Result<(), RepositoryError> {
                unreachable!()
            }
            async fn find_before(
                &self,
                _cutoff: crate::domain::foundation::Timestamp,
            ) -> Result<Vec<Session>, RepositoryError> {
                unreachable!()
            }
            async fn delete_many(&self, _ids: &[SessionId]) -> Result<u64, RepositoryError> {
                unreachable!()
            }
        }

        let (api, _, _) = api();
        let api = SessionApi::new(
            Arc::new(FailingRepo),
            api.attachments.clone(),
            api.blobs.clone(),
            api.publisher.clone(),
        );

        let err = api
            .with_session("abc123", &logger(), |_session, _logger| async move {
                Ok(JsonValue::Null)
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            HandlerError::Repository(RepositoryError::Backend { .. })
        ));
    }

    #[tokio::test]
    async fn publish_failures_are_swallowed() {
        struct FailingBus;

        #[async_trait]
        impl EventPublisher for FailingBus {
            async fn publish(&self, _event: EventEnvelope) -> Result<(), PublishError> {
                Err(PublishError::transport("broker down"))
            }
        }

        let (api, _, _) = api();
        let api = SessionApi::new(
            api.sessions.clone(),
            api.attachments.clone(),
            api.blobs.clone(),
            Arc::new(FailingBus),
        );

        let event = SessionDeleted::now(SessionId::new("abc123").unwrap());
        // Must not panic or error.
        api.publish(event.to_envelope(), &logger()).await;
    }
}
