//! Integration tests for the session API through the real router.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use driftpad::adapters::http::{app_router, SessionApi};
use driftpad::adapters::{
    InMemoryAttachmentRepository, InMemoryBlobStorage, InMemoryEventBus,
    InMemorySessionRepository,
};

struct TestApp {
    router: Router,
    bus: Arc<InMemoryEventBus>,
}

impl TestApp {
    fn new() -> Self {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let attachments = Arc::new(InMemoryAttachmentRepository::paired_with(&sessions));
        let blobs = Arc::new(InMemoryBlobStorage::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let api = SessionApi::new(sessions, attachments, blobs, bus.clone());
        Self {
            router: app_router(api, Duration::from_secs(5)),
            bus,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, JsonValue) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create_session(&self, content: &str) -> String {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/sessions")
            .body(Body::from(content.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn create_then_get_round_trips_content() {
    let app = TestApp::new();
    let id = app.create_session("shared notes").await;

    let request = Request::builder()
        .uri(format!("/api/sessions/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["content"], "shared notes");
    assert!(body.get("message").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn unknown_session_yields_the_fixed_404_envelope() {
    let app = TestApp::new();

    let request = Request::builder()
        .uri("/api/sessions/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "message": "Resource not found",
            "error": "Session not found",
        })
    );
}

#[tokio::test]
async fn patch_replaces_session_content() {
    let app = TestApp::new();
    let id = app.create_session("v1").await;

    let request = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/sessions/{id}"))
        .body(Body::from("v2"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], "v2");

    let updated = app.bus.events_of_type("session.updated");
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].entity_id, id);
}

#[tokio::test]
async fn delete_announces_and_forgets_the_session() {
    let app = TestApp::new();
    let id = app.create_session("gone soon").await;

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/sessions/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let deleted = app.bus.events_of_type("session.deleted");
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].entity_id, id);

    let request = Request::builder()
        .uri(format!("/api/sessions/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attachment_upload_list_download_cycle() {
    let app = TestApp::new();
    let id = app.create_session("with files").await;

    // upload
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/sessions/{id}/attachments?name=notes.txt"))
        .header(header::CONTENT_TYPE, "text/markdown")
        .body(Body::from("# heading"))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    let attachment_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["name"], "notes.txt");

    // list
    let request = Request::builder()
        .uri(format!("/api/sessions/{id}/attachments"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // download goes through the raw pipeline: original bytes and media type
    let request = Request::builder()
        .uri(format!("/api/attachments/{attachment_id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/markdown");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"# heading");
}

#[tokio::test]
async fn downloading_a_missing_attachment_is_a_plain_404() {
    let app = TestApp::new();

    let request = Request::builder()
        .uri("/api/attachments/nope")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
}
