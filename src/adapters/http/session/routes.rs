//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, delete_session, download_attachment, get_session, list_attachments,
    update_session, upload_attachment, SessionApi,
};

/// Creates the session router with all endpoints.
pub fn session_routes(api: SessionApi) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route(
            "/sessions/:id",
            get(get_session).patch(update_session).delete(delete_session),
        )
        .route(
            "/sessions/:id/attachments",
            post(upload_attachment).get(list_attachments),
        )
        .route("/attachments/:id", get(download_attachment))
        .with_state(api)
}
