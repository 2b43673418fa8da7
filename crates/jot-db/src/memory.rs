//! In-memory store implementations.
//!
//! The redesigned form of the original unguarded global list: a
//! mutex-guarded Vec plus id counter, shared behind the same trait as the
//! database backends. Used in testing mode and by the API test suite.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use jot_core::{
    AuditStore, CreateNoteRequest, Error, ListNotesRequest, ListNotesResponse, LogRecord,
    NewLogRecord, Note, NoteStore, Result, UpdateNoteRequest,
};

#[derive(Default)]
struct NotesInner {
    notes: Vec<Note>,
    next_id: i64,
}

/// In-memory implementation of NoteStore.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: Mutex<NotesInner>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, NotesInner> {
        // A poisoned lock only means a panic mid-mutation elsewhere; the
        // data itself is a plain Vec and still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list(&self, req: ListNotesRequest) -> Result<ListNotesResponse> {
        let page = req.page();
        let per_page = req.per_page();
        let offset = req.offset() as usize;

        let inner = self.lock();
        let needle = req.q.as_deref().map(str::to_lowercase);
        let mut matched: Vec<&Note> = inner
            .notes
            .iter()
            .filter(|n| match &needle {
                Some(q) => n.title.to_lowercase().contains(q),
                None => true,
            })
            .collect();
        matched.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = matched.len() as i64;
        let notes = matched
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok(ListNotesResponse {
            notes,
            total,
            page,
            per_page,
        })
    }

    async fn get(&self, id: i64) -> Result<Note> {
        self.lock()
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;
        let mut inner = self.lock();
        inner.next_id += 1;
        let note = Note {
            id: inner.next_id,
            title: req.title,
            content: req.content.unwrap_or_default(),
            status: req.status.unwrap_or_default(),
            created_at: Utc::now(),
        };
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note> {
        req.validate()?;
        let mut inner = self.lock();
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;
        if let Some(title) = req.title {
            note.title = title;
        }
        if let Some(content) = req.content {
            note.content = content;
        }
        if let Some(status) = req.status {
            note.status = status;
        }
        Ok(note.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.lock();
        let before = inner.notes.len();
        inner.notes.retain(|n| n.id != id);
        if inner.notes.len() == before {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}

#[derive(Default)]
struct AuditInner {
    records: Vec<LogRecord>,
    next_id: i64,
}

/// In-memory implementation of AuditStore.
#[derive(Default)]
pub struct MemoryAuditStore {
    inner: Mutex<AuditInner>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AuditInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, rec: NewLogRecord) -> Result<()> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let record = LogRecord {
            id: inner.next_id,
            timestamp: rec.timestamp,
            ip: rec.ip,
            action: rec.action,
            note_id: rec.note_id,
            device: rec.device,
            browser: rec.browser,
            details: rec.details,
            endpoint: rec.endpoint,
            method: rec.method,
        };
        inner.records.push(record);
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LogRecord>> {
        let inner = self.lock();
        Ok(inner
            .records
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
