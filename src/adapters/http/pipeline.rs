//! Request pipeline wrappers.
//!
//! Every endpoint goes through [`dispatch_raw`] or [`dispatch_rest`]: a
//! request-scoped logger is created before any handler logic runs and handed
//! to the handler explicitly, handler failures are converted into error
//! responses instead of aborting the connection, unset response legs get
//! transport defaults, and the response is written exactly once.

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::{header, StatusCode};
use std::future::Future;
use thiserror::Error;
use tracing::Span;

use crate::domain::foundation::{PublishError, RepositoryError, SessionId};
use crate::ports::StorageError;

use super::response::{RawResponse, RestResponse, JSON_CONTENT_TYPE};

/// Request bodies larger than this are rejected while buffering.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Errors a business handler can surface to the pipeline.
///
/// The Display text of the variant feeds the envelope's `error` field, so
/// repository/storage messages reach the client verbatim on the 500 path.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("response serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read request body: {0}")]
    Body(String),
}

/// Logger bound to a single request's lifetime.
///
/// Wraps a `tracing` span carrying the request's identifying fields. The
/// pipeline creates one per request and passes it explicitly down the call
/// chain; it is owned by that request and never shared across requests.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    span: Span,
}

impl RequestLogger {
    /// Creates a logger scoped to the given request.
    pub fn for_request(req: &Request) -> Self {
        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let span = tracing::info_span!(
            "request",
            method = %req.method(),
            path = %req.uri().path(),
            %request_id,
        );
        Self { span }
    }

    /// Derives a logger additionally scoped to a resolved session.
    pub fn for_session(&self, session_id: &SessionId) -> Self {
        let span = tracing::info_span!(parent: &self.span, "session", session_id = %session_id);
        Self { span }
    }

    /// Emits an info-level line within the request's scope.
    pub fn info(&self, message: impl std::fmt::Display) {
        self.span.in_scope(|| tracing::info!("{message}"));
    }

    /// Emits a warn-level line within the request's scope.
    pub fn warn(&self, message: impl std::fmt::Display) {
        self.span.in_scope(|| tracing::warn!("{message}"));
    }

    /// Emits an error-level line within the request's scope.
    pub fn error(&self, message: impl std::fmt::Display) {
        self.span.in_scope(|| tracing::error!("{message}"));
    }
}

/// Buffers the request body, enforcing the size cap.
pub async fn read_body(req: Request) -> Result<Bytes, HandlerError> {
    axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| HandlerError::Body(e.to_string()))
}

/// Runs a raw handler through the pipeline.
///
/// A handler error becomes a plain-text 500; `None` and unset legs become the
/// transport defaults.
pub async fn dispatch_raw<F, Fut>(req: Request, handler: F) -> Response
where
    F: FnOnce(Request, RequestLogger) -> Fut,
    Fut: Future<Output = Result<Option<RawResponse>, HandlerError>>,
{
    let logger = RequestLogger::for_request(&req);

    let raw = match handler(req, logger.clone()).await {
        Ok(Some(raw)) => raw,
        Ok(None) => RawResponse::new(),
        Err(err) => {
            logger.error(format!("handler failed: {err}"));
            return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
        }
    };

    let (status_code, content_type, body) = raw.finalize();
    match Response::builder()
        .status(status_code)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
    {
        Ok(response) => response,
        Err(err) => {
            logger.error(format!("failed to assemble response: {err}"));
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Runs a REST handler through the pipeline.
///
/// Composes [`dispatch_raw`] around JSON serialization of the finalized
/// envelope. A handler error is caught and becomes an error envelope with
/// status 500 unless the handler attached a specific code to its envelope;
/// a serialization failure of the envelope itself falls through to the raw
/// pipeline's 500 path.
pub async fn dispatch_rest<F, Fut>(req: Request, handler: F) -> Response
where
    F: FnOnce(Request, RequestLogger) -> Fut,
    Fut: Future<Output = Result<Option<RestResponse>, HandlerError>>,
{
    dispatch_raw(req, |req, logger| async move {
        let envelope = match handler(req, logger).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => RestResponse::new(),
            Err(err) => RestResponse::from_error(err),
        };

        let (status_code, envelope) = envelope.finalized();
        let body = serde_json::to_vec(&envelope)?;
        Ok(Some(
            RawResponse::new()
                .with_status(status_code)
                .with_content_type(JSON_CONTENT_TYPE)
                .with_body(body),
        ))
    })
    .await
}
