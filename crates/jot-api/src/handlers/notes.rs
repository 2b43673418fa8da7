//! Note CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use jot_core::{CreateNoteRequest, ListNotesRequest, NoteStatus, UpdateNoteRequest};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    /// Case-insensitive title substring filter.
    q: Option<String>,
    page: Option<i64>,
    per_page: Option<i64>,
}

pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate pagination parameters before the storage query
    if let Some(page) = query.page {
        if page < 1 {
            return Err(ApiError::BadRequest("page must be >= 1".into()));
        }
    }
    if let Some(per_page) = query.per_page {
        if per_page < 1 {
            return Err(ApiError::BadRequest("per_page must be >= 1".into()));
        }
    }

    let response = state
        .db
        .notes
        .list(ListNotesRequest {
            q: query.q,
            page: query.page,
            per_page: query.per_page,
        })
        .await?;
    Ok(Json(response))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.get(id).await?;
    Ok(Json(note))
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteBody {
    title: Option<String>,
    content: Option<String>,
    /// Workflow status: "todo" (default), "doing", or "complete".
    status: Option<String>,
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<CreateNoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("title is required".to_string()))?;
    let status = parse_status(body.status)?;

    let note = state
        .db
        .notes
        .create(CreateNoteRequest {
            title,
            content: body.content,
            status,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteBody {
    title: Option<String>,
    content: Option<String>,
    status: Option<String>,
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateNoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let status = parse_status(body.status)?;
    let note = state
        .db
        .notes
        .update(
            id,
            UpdateNoteRequest {
                title: body.title,
                content: body.content,
                status,
            },
        )
        .await?;
    Ok(Json(note))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    status: Option<String>,
}

pub async fn update_note_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = body
        .status
        .ok_or_else(|| ApiError::BadRequest("status is required".to_string()))?;
    let status = NoteStatus::parse(&raw).map_err(ApiError::from)?;

    let note = state
        .db
        .notes
        .update(
            id,
            UpdateNoteRequest {
                status: Some(status),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_status(raw: Option<String>) -> Result<Option<NoteStatus>, ApiError> {
    raw.map(|s| NoteStatus::parse(&s))
        .transpose()
        .map_err(ApiError::from)
}
