//! Application router assembly.
//!
//! Middleware is shared across all endpoints: a request id is generated
//! before tracing so the pipeline's request logger can pick it up, and the
//! trace layer owns the log line for responses that fail on the way out.

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::session::{session_routes, SessionApi};

/// Builds the full application router.
pub fn app_router(api: SessionApi, request_timeout: Duration) -> Router {
    Router::new().nest("/api", session_routes(api)).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CorsLayer::permissive()),
    )
}
