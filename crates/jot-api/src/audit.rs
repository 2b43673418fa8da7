//! Request audit pipeline.
//!
//! Every note/log request is recorded in two sinks: a size-rotated
//! plain-text file and the `logs` table. Neither sink failing may fail the
//! triggering request; failures are logged at warn level and swallowed.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::warn;

use jot_core::{classify_browser, classify_device, AuditStore, NewLogRecord};

use crate::client::client_ip;
use crate::AppState;

/// A plain-text log file rotated at a byte threshold.
///
/// Backups are `<name>.1` (most recent) through `<name>.N`; the oldest is
/// dropped on rotation.
pub struct RotatingAuditLog {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    guard: Mutex<()>,
}

impl RotatingAuditLog {
    pub fn new(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes: max_bytes.max(1),
            backups,
            guard: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    /// Append one line, rotating first if it would push the file over the
    /// threshold.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let _guard = self.lock();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let current_len = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if current_len > 0 && current_len + line.len() as u64 + 1 > self.max_bytes {
            self.rotate()?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }
        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }

    /// Last `n` lines of the current file, oldest first. A missing file is
    /// an empty log, not an error.
    pub fn tail(&self, n: usize) -> io::Result<Vec<String>> {
        let _guard = self.lock();
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let lines: Vec<&str> = content.lines().collect();
        let skip = lines.len().saturating_sub(n);
        Ok(lines[skip..].iter().map(|s| s.to_string()).collect())
    }
}

/// Audit writer fanning out to the rotating file and the log table.
pub struct AuditLogger {
    file: RotatingAuditLog,
    store: Arc<dyn AuditStore>,
}

impl AuditLogger {
    pub fn new(path: PathBuf, max_bytes: u64, backups: usize, store: Arc<dyn AuditStore>) -> Self {
        Self {
            file: RotatingAuditLog::new(path, max_bytes, backups),
            store,
        }
    }

    /// Record one action in both sinks, best-effort.
    pub async fn record(&self, rec: NewLogRecord) {
        if let Err(e) = self.file.append_line(&rec.format_line()) {
            warn!(
                subsystem = "audit",
                component = "file",
                error = %e,
                "Audit file write failed"
            );
        }
        if let Err(e) = self.store.append(rec).await {
            warn!(
                subsystem = "audit",
                component = "store",
                error = %e,
                "Audit table insert failed"
            );
        }
    }

    /// Last `n` lines of the audit file.
    pub fn tail(&self, n: usize) -> io::Result<Vec<String>> {
        self.file.tail(n)
    }
}

/// Map a request to its audited action name and note id, if it is one of
/// the audited endpoints.
fn audited_action(method: &str, path: &str) -> Option<(&'static str, Option<i64>)> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match (method, segments.as_slice()) {
        ("GET", ["notes"]) => Some(("list_notes", None)),
        ("POST", ["notes"]) => Some(("create_note", None)),
        ("PATCH", ["notes", id, "status"]) => Some(("update_status", id.parse().ok())),
        ("GET", ["notes", id]) => Some(("get_note", id.parse().ok())),
        ("PUT" | "PATCH", ["notes", id]) => Some(("update_note", id.parse().ok())),
        ("DELETE", ["notes", id]) => Some(("delete_note", id.parse().ok())),
        ("GET", ["logs"]) => Some(("view_logs", None)),
        _ => None,
    }
}

/// Axum middleware recording an audit trail entry for each audited action.
pub async fn audit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();
    let ip = client_ip(request.headers(), connect_info.map(|ConnectInfo(addr)| addr));
    let user_agent = request
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let response = next.run(request).await;

    if let Some((action, note_id)) = audited_action(&method, &path) {
        let rec = NewLogRecord {
            timestamp: Utc::now(),
            ip,
            action: action.to_string(),
            note_id,
            device: classify_device(&user_agent),
            browser: classify_browser(&user_agent),
            details: format!("status={}", response.status().as_u16()),
            endpoint: path,
            method,
        };
        state.audit_log.record(rec).await;
    }

    response
}
