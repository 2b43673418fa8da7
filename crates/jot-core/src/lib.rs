//! # jot-core
//!
//! Core types, traits, and abstractions for the jot note-taking backend.
//!
//! This crate provides the data model, the storage traits that the concrete
//! backends implement, the shared error type, and the pure helpers (config
//! parsing, user-agent classification) that the other jot crates depend on.

pub mod config;
pub mod error;
pub mod models;
pub mod traits;
pub mod useragent;

// Re-export commonly used types at crate root
pub use config::{AppConfig, DatabaseTarget};
pub use error::{Error, Result};
pub use models::{BrowserFamily, DeviceClass, LogRecord, NewLogRecord, Note, NoteStatus};
pub use traits::{
    AuditStore, CreateNoteRequest, ListNotesRequest, ListNotesResponse, NoteStore,
    UpdateNoteRequest,
};
pub use useragent::{classify_browser, classify_device};
