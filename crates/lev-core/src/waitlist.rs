//! Waitlist persistence.
//!
//! # Uniqueness
//!
//! The `email` column is declared `UNIQUE`; the store never checks for an
//! existing row before inserting. Concurrent submissions of the same address
//! race at the database and the loser observes [`InsertError::Duplicate`].
//!
//! Duplicate detection reads the structured SQLite extended result code,
//! never the error message text.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use thiserror::Error;

use crate::email::Email;
use crate::error::{LevError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS waitlist (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    email      TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);
";

// ---------------------------------------------------------------------------
// InsertError
// ---------------------------------------------------------------------------

/// Outcome of a failed insert, classified by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("email already on the waitlist")]
    Duplicate,

    #[error("{0}")]
    Storage(String),
}

impl From<InsertError> for LevError {
    fn from(err: InsertError) -> Self {
        match err {
            InsertError::Duplicate => LevError::AlreadySignedUp,
            InsertError::Storage(msg) => LevError::Storage(msg),
        }
    }
}

/// Classify a rusqlite failure. Only `SQLITE_CONSTRAINT_UNIQUE` and
/// `SQLITE_CONSTRAINT_PRIMARYKEY` count as duplicates.
pub fn classify_sqlite_error(err: rusqlite::Error) -> InsertError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        {
            return InsertError::Duplicate;
        }
    }
    InsertError::Storage(err.to_string())
}

// ---------------------------------------------------------------------------
// WaitlistEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistEntry {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// SqliteWaitlist
// ---------------------------------------------------------------------------

/// Local SQLite-backed waitlist. Used for development and self-hosting; the
/// hosted site points at a managed Postgres instead.
pub struct SqliteWaitlist {
    conn: Mutex<Connection>,
}

impl SqliteWaitlist {
    /// Open (or create) the database file at `path` and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self::bootstrap(conn)?;
        tracing::info!(path = %path.display(), "waitlist database ready");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> std::result::Result<T, InsertError>,
    ) -> std::result::Result<T, InsertError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| InsertError::Storage("waitlist connection lock poisoned".into()))?;
        f(&conn)
    }

    /// Insert one normalized email.
    pub fn insert(&self, email: &Email) -> std::result::Result<(), InsertError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO waitlist (email) VALUES (?1)",
                params![email.as_str()],
            )
            .map_err(classify_sqlite_error)?;
            Ok(())
        })
    }

    /// All signups, oldest first.
    pub fn list(&self) -> Result<Vec<WaitlistEntry>> {
        let rows = self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT email, created_at FROM waitlist ORDER BY id ASC")
                .map_err(classify_sqlite_error)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })
                .map_err(classify_sqlite_error)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(classify_sqlite_error)?;
            Ok(rows)
        })?;

        rows.into_iter()
            .map(|(email, created_at)| {
                let created_at = DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| LevError::Storage(format!("bad created_at '{created_at}': {e}")))?
                    .with_timezone(&Utc);
                Ok(WaitlistEntry { email, created_at })
            })
            .collect()
    }

    pub fn count(&self) -> Result<u64> {
        let n = self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM waitlist", [], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(classify_sqlite_error)
        })?;
        Ok(n.max(0) as u64)
    }

    /// Run raw SQL against the underlying connection. Test support only.
    #[doc(hidden)]
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.with_conn(|conn| conn.execute_batch(sql).map_err(classify_sqlite_error))?;
        Ok(())
    }
}
