//! HTTP handlers.

pub mod logs;
pub mod notes;

use axum::{extract::State, response::Html, response::IntoResponse, Json};

use crate::AppState;

/// Bundled single-page frontend served at the root path.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Liveness check reporting the resolved storage backend.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.db.backend,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
