//! Core data models for jot.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Workflow status of a note.
///
/// Serialized lowercase on the wire and in storage ("todo", "doing",
/// "complete"). Any other value is a validation error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    #[default]
    Todo,
    Doing,
    Complete,
}

impl NoteStatus {
    /// Canonical lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::Todo => "todo",
            NoteStatus::Doing => "doing",
            NoteStatus::Complete => "complete",
        }
    }

    /// Parse the storage/wire form, rejecting anything outside the enumeration.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "todo" => Ok(NoteStatus::Todo),
            "doing" => Ok(NoteStatus::Doing),
            "complete" => Ok(NoteStatus::Complete),
            other => Err(Error::InvalidInput(format!(
                "status must be one of todo, doing, complete (got \"{}\")",
                other
            ))),
        }
    }
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A persisted note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Storage-assigned identifier, monotonically increasing per backend.
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: NoteStatus,
    /// Assigned at insert time, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// Device classification derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "Mobile",
            DeviceClass::Tablet => "Tablet",
            DeviceClass::Desktop => "Desktop",
        }
    }

    /// Parse the stored form; unknown values map to Desktop.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "Mobile" => DeviceClass::Mobile,
            "Tablet" => DeviceClass::Tablet,
            _ => DeviceClass::Desktop,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser family derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowserFamily {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Other,
}

impl BrowserFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "Chrome",
            BrowserFamily::Firefox => "Firefox",
            BrowserFamily::Safari => "Safari",
            BrowserFamily::Edge => "Edge",
            BrowserFamily::Other => "Other",
        }
    }

    /// Parse the stored form; unknown values map to Other.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "Chrome" => BrowserFamily::Chrome,
            "Firefox" => BrowserFamily::Firefox,
            "Safari" => BrowserFamily::Safari,
            "Edge" => BrowserFamily::Edge,
            _ => BrowserFamily::Other,
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted audit record. Append-only; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub action: String,
    pub note_id: Option<i64>,
    pub device: DeviceClass,
    pub browser: BrowserFamily,
    pub details: String,
    pub endpoint: String,
    pub method: String,
}

/// An audit record before storage assigns its identifier.
#[derive(Debug, Clone)]
pub struct NewLogRecord {
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub action: String,
    pub note_id: Option<i64>,
    pub device: DeviceClass,
    pub browser: BrowserFamily,
    pub details: String,
    pub endpoint: String,
    pub method: String,
}

impl NewLogRecord {
    /// Render the single-line plain-text form written to the audit file.
    pub fn format_line(&self) -> String {
        format!(
            "{} ip={} action={} note_id={} device={} browser={} endpoint={} method={} details={}",
            self.timestamp.to_rfc3339(),
            self.ip,
            self.action,
            self.note_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.device,
            self.browser,
            self.endpoint,
            self.method,
            self.details,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_todo() {
        assert_eq!(NoteStatus::default(), NoteStatus::Todo);
    }

    #[test]
    fn test_status_parse_valid() {
        assert_eq!(NoteStatus::parse("todo").unwrap(), NoteStatus::Todo);
        assert_eq!(NoteStatus::parse("doing").unwrap(), NoteStatus::Doing);
        assert_eq!(NoteStatus::parse("complete").unwrap(), NoteStatus::Complete);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        for bad in ["done", "TODO", "in-progress", ""] {
            let err = NoteStatus::parse(bad).unwrap_err();
            assert!(err.to_string().contains("status must be one of"));
        }
    }

    #[test]
    fn test_status_serde_roundtrip() {
        let json = serde_json::to_string(&NoteStatus::Doing).unwrap();
        assert_eq!(json, "\"doing\"");
        let back: NoteStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NoteStatus::Doing);
    }

    #[test]
    fn test_note_serializes_with_lowercase_status() {
        let note = Note {
            id: 1,
            title: "Buy milk".to_string(),
            content: String::new(),
            status: NoteStatus::Todo,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["status"], "todo");
        assert_eq!(value["content"], "");
    }

    #[test]
    fn test_log_record_format_line() {
        let rec = NewLogRecord {
            timestamp: Utc::now(),
            ip: "10.0.0.1".to_string(),
            action: "create_note".to_string(),
            note_id: Some(7),
            device: DeviceClass::Desktop,
            browser: BrowserFamily::Firefox,
            details: "status=201".to_string(),
            endpoint: "/notes".to_string(),
            method: "POST".to_string(),
        };
        let line = rec.format_line();
        assert!(line.contains("ip=10.0.0.1"));
        assert!(line.contains("action=create_note"));
        assert!(line.contains("note_id=7"));
        assert!(line.contains("browser=Firefox"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_log_record_format_line_without_note_id() {
        let rec = NewLogRecord {
            timestamp: Utc::now(),
            ip: "unknown".to_string(),
            action: "list_notes".to_string(),
            note_id: None,
            device: DeviceClass::Mobile,
            browser: BrowserFamily::Other,
            details: "status=200".to_string(),
            endpoint: "/notes".to_string(),
            method: "GET".to_string(),
        };
        assert!(rec.format_line().contains("note_id=-"));
    }
}
