//! Shared helpers for API integration tests.
//!
//! Builds the full router over the in-memory backend with an audit file in
//! a temp directory, and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use jot_api::{audit::AuditLogger, build_router, AppState};
use jot_db::Database;

pub const TEST_LOGS_PASSWORD: &str = "sekrit";

pub fn test_state(dir: &tempfile::TempDir, logs_password: Option<&str>) -> AppState {
    let db = Database::in_memory();
    let audit_log = Arc::new(AuditLogger::new(
        dir.path().join("audit.log"),
        64 * 1024,
        3,
        db.audit.clone(),
    ));
    AppState {
        db,
        audit_log,
        logs_password: logs_password.map(String::from),
    }
}

pub fn test_app(dir: &tempfile::TempDir) -> Router {
    build_router(test_state(dir, Some(TEST_LOGS_PASSWORD)))
}

/// Send a request and parse the response body as JSON (Null when empty).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = request_raw(app, method, uri, body, headers).await;
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, value)
}

/// Send a request and return the raw response body.
pub async fn request_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, bytes.to_vec())
}

/// Create a note and return its id.
pub async fn create_note(app: &Router, title: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/notes",
        Some(serde_json::json!({ "title": title })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("note id")
}
