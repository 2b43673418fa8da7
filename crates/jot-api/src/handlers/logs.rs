//! Audit log viewer.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{ApiError, AppState};

/// How many trailing audit lines the viewer returns.
const LOG_VIEW_LINES: usize = 100;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    password: Option<String>,
}

pub async fn view_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let expected = state
        .logs_password
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("log viewer is disabled".to_string()))?;
    if query.password.as_deref() != Some(expected) {
        return Err(ApiError::Unauthorized("invalid password".to_string()));
    }

    let lines = state
        .audit_log
        .tail(LOG_VIEW_LINES)
        .map_err(jot_core::Error::Io)?;
    Ok(Json(serde_json::json!({
        "count": lines.len(),
        "lines": lines,
    })))
}
