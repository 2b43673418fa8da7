//! PostgreSQL store implementations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use jot_core::{
    AuditStore, BrowserFamily, CreateNoteRequest, DeviceClass, Error, ListNotesRequest,
    ListNotesResponse, LogRecord, NewLogRecord, Note, NoteStatus, NoteStore, Result,
    UpdateNoteRequest,
};

use crate::escape_like;

const NOTE_COLUMNS: &str = "id, title, content, status, created_at";

/// PostgreSQL implementation of NoteStore.
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    /// Create a new PgNoteStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_note_row(row: &PgRow) -> Result<Note> {
    let status: String = row.get("status");
    Ok(Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        status: NoteStatus::parse(&status)
            .map_err(|_| Error::Internal(format!("unknown status \"{}\" in storage", status)))?,
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn list(&self, req: ListNotesRequest) -> Result<ListNotesResponse> {
        let page = req.page();
        let per_page = req.per_page();
        let offset = req.offset();

        let pattern = req
            .q
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", escape_like(q)));

        let (total, rows) = if let Some(pattern) = &pattern {
            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE title ILIKE $1 ESCAPE '\\'")
                    .bind(pattern)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(Error::Database)?;
            let rows = sqlx::query(&format!(
                "SELECT {} FROM notes WHERE title ILIKE $1 ESCAPE '\\' \
                 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
                NOTE_COLUMNS
            ))
            .bind(pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
            (total, rows)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;
            let rows = sqlx::query(&format!(
                "SELECT {} FROM notes ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
                NOTE_COLUMNS
            ))
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
            (total, rows)
        };

        let notes = rows
            .iter()
            .map(map_note_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(ListNotesResponse {
            notes,
            total,
            page,
            per_page,
        })
    }

    async fn get(&self, id: i64) -> Result<Note> {
        let row = sqlx::query(&format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))?;
        map_note_row(&row)
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;
        let content = req.content.unwrap_or_default();
        let status = req.status.unwrap_or_default();
        let row = sqlx::query(&format!(
            "INSERT INTO notes (title, content, status, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(&req.title)
        .bind(&content)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;
        map_note_row(&row)
    }

    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note> {
        req.validate()?;
        if req.is_empty() {
            return self.get(id).await;
        }

        // $1 = id, dynamic params start at $2
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx = 2;
        if req.title.is_some() {
            sets.push(format!("title = ${}", param_idx));
            param_idx += 1;
        }
        if req.content.is_some() {
            sets.push(format!("content = ${}", param_idx));
            param_idx += 1;
        }
        if req.status.is_some() {
            sets.push(format!("status = ${}", param_idx));
        }

        let query = format!(
            "UPDATE notes SET {} WHERE id = $1 RETURNING {}",
            sets.join(", "),
            NOTE_COLUMNS
        );

        let mut q = sqlx::query(&query).bind(id);
        if let Some(title) = &req.title {
            q = q.bind(title);
        }
        if let Some(content) = &req.content {
            q = q.bind(content);
        }
        if let Some(status) = req.status {
            q = q.bind(status.as_str());
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))?;
        map_note_row(&row)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}

/// PostgreSQL implementation of AuditStore.
pub struct PgAuditStore {
    pool: PgPool,
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_log_row(row: &PgRow) -> LogRecord {
    let device: String = row.get("device");
    let browser: String = row.get("browser");
    LogRecord {
        id: row.get("id"),
        timestamp: row.get("timestamp"),
        ip: row.get("ip"),
        action: row.get("action"),
        note_id: row.get("note_id"),
        device: DeviceClass::from_str_lossy(&device),
        browser: BrowserFamily::from_str_lossy(&browser),
        details: row.get("details"),
        endpoint: row.get("endpoint"),
        method: row.get("method"),
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn append(&self, rec: NewLogRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO logs (timestamp, ip, action, note_id, device, browser, details, endpoint, method) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(rec.timestamp)
        .bind(&rec.ip)
        .bind(&rec.action)
        .bind(rec.note_id)
        .bind(rec.device.as_str())
        .bind(rec.browser.as_str())
        .bind(&rec.details)
        .bind(&rec.endpoint)
        .bind(&rec.method)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LogRecord>> {
        let rows = sqlx::query(
            "SELECT id, timestamp, ip, action, note_id, device, browser, details, endpoint, method \
             FROM logs ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(rows.iter().map(map_log_row).collect())
    }
}
