//! Storage traits for jot.
//!
//! These traits define the interfaces the concrete storage backends
//! (PostgreSQL, embedded SQLite, in-memory) must satisfy, enabling a single
//! injected store abstraction instead of per-variant handler code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{LogRecord, NewLogRecord, Note, NoteStatus};

/// Default page size when the client does not supply `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound on `per_page`; larger requests are clamped.
pub const MAX_PER_PAGE: i64 = 100;

/// Maximum accepted title length, matching the original schema constraint.
pub const MAX_TITLE_LEN: usize = 200;

/// Request for listing notes.
#[derive(Debug, Clone, Default)]
pub struct ListNotesRequest {
    /// Case-insensitive title substring filter.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub per_page: Option<i64>,
}

impl ListNotesRequest {
    /// Effective 1-based page number.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `1..=MAX_PER_PAGE`.
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// Row offset for the effective page. Saturates so an absurd client
    /// page number cannot overflow into a negative offset.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

/// Response for listing notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
    /// Count of the filtered set across all pages.
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub status: Option<NoteStatus>,
}

impl CreateNoteRequest {
    /// Validate the request, rejecting empty or oversized titles.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

/// Request for a partial note update. Only supplied fields are overwritten.
#[derive(Debug, Clone, Default)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<NoteStatus>,
}

impl UpdateNoteRequest {
    /// Validate any supplied fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }

    /// True if no fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::InvalidInput(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

/// Store for note CRUD operations.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// List notes, newest first, with optional title filter and pagination.
    async fn list(&self, req: ListNotesRequest) -> Result<ListNotesResponse>;

    /// Fetch a note by id.
    async fn get(&self, id: i64) -> Result<Note>;

    /// Insert a new note, assigning id and creation timestamp.
    async fn create(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Partially update a note; only supplied fields change.
    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note>;

    /// Hard-delete a note.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Append-only store for audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one record.
    async fn append(&self, rec: NewLogRecord) -> Result<()>;

    /// Most recent records, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<LogRecord>>;
}
