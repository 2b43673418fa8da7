//! Idempotent schema creation.
//!
//! Runs once at startup, right after a pool is established — never from the
//! request path, so a slow-starting process cannot race its first audit
//! write against table creation.

use sqlx::postgres::PgPool;
use sqlx::sqlite::SqlitePool;

use jot_core::{Error, Result};

const POSTGRES_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS notes (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'todo',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes (created_at DESC, id DESC)",
    "CREATE TABLE IF NOT EXISTS logs (
        id BIGSERIAL PRIMARY KEY,
        timestamp TIMESTAMPTZ NOT NULL DEFAULT now(),
        ip TEXT NOT NULL,
        action TEXT NOT NULL,
        note_id BIGINT,
        device TEXT NOT NULL,
        browser TEXT NOT NULL,
        details TEXT NOT NULL DEFAULT '',
        endpoint TEXT NOT NULL,
        method TEXT NOT NULL
    )",
];

const SQLITE_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'todo',
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes (created_at DESC, id DESC)",
    "CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        ip TEXT NOT NULL,
        action TEXT NOT NULL,
        note_id INTEGER,
        device TEXT NOT NULL,
        browser TEXT NOT NULL,
        details TEXT NOT NULL DEFAULT '',
        endpoint TEXT NOT NULL,
        method TEXT NOT NULL
    )",
];

/// Create the notes and logs tables on PostgreSQL if they do not exist.
pub async fn ensure_schema_postgres(pool: &PgPool) -> Result<()> {
    for statement in POSTGRES_SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }
    Ok(())
}

/// Create the notes and logs tables on SQLite if they do not exist.
pub async fn ensure_schema_sqlite(pool: &SqlitePool) -> Result<()> {
    for statement in SQLITE_SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statements_are_idempotent() {
        for statement in POSTGRES_SCHEMA.iter().chain(SQLITE_SCHEMA.iter()) {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "schema statement must be idempotent: {}",
                statement
            );
        }
    }
}
