//! Waitlist storage backends.
//!
//! Every backend enforces email uniqueness itself and reports a violation as
//! [`InsertError::Duplicate`], read from a structured error code. The server
//! never looks for an existing row first.

pub mod postgres;
pub mod supabase;

use std::path::PathBuf;
use std::sync::Arc;

use lev_core::waitlist::{InsertError, SqliteWaitlist};
use lev_core::{Email, LevError};

pub use postgres::PostgresWaitlist;
pub use supabase::SupabaseWaitlist;

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

/// Which backend to talk to. Credentials stay server-side.
#[derive(Clone)]
pub enum StorageConfig {
    Sqlite { path: PathBuf },
    Supabase { url: String, service_role_key: String },
    Postgres { url: String },
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageConfig::Sqlite { path } => {
                f.debug_struct("Sqlite").field("path", path).finish()
            }
            StorageConfig::Supabase { url, .. } => f
                .debug_struct("Supabase")
                .field("url", url)
                .field("service_role_key", &"<redacted>")
                .finish(),
            StorageConfig::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("url", &"<redacted>")
                .finish(),
        }
    }
}

impl StorageConfig {
    /// Pick a backend from the available settings.
    ///
    /// Priority: Supabase (both URL and service-role key set), then a Postgres
    /// connection URL, then the local SQLite file.
    pub fn select(
        supabase_url: Option<String>,
        service_role_key: Option<String>,
        database_url: Option<String>,
        sqlite_path: PathBuf,
    ) -> anyhow::Result<Self> {
        let nonempty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (nonempty(supabase_url), nonempty(service_role_key)) {
            (Some(url), Some(service_role_key)) => {
                return Ok(StorageConfig::Supabase {
                    url,
                    service_role_key,
                })
            }
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("Missing SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY environment variables")
            }
            (None, None) => {}
        }
        if let Some(url) = nonempty(database_url) {
            return Ok(StorageConfig::Postgres { url });
        }
        Ok(StorageConfig::Sqlite { path: sqlite_path })
    }

    pub async fn open(self) -> anyhow::Result<WaitlistStore> {
        let store = match self {
            StorageConfig::Sqlite { path } => {
                let db = tokio::task::spawn_blocking(move || SqliteWaitlist::open(&path))
                    .await
                    .map_err(|e| anyhow::anyhow!("task join error: {e}"))??;
                WaitlistStore::Sqlite(Arc::new(db))
            }
            StorageConfig::Supabase {
                url,
                service_role_key,
            } => WaitlistStore::Supabase(Arc::new(SupabaseWaitlist::new(&url, service_role_key)?)),
            StorageConfig::Postgres { url } => {
                WaitlistStore::Postgres(Arc::new(PostgresWaitlist::connect_lazy(&url)?))
            }
        };
        tracing::info!(backend = store.backend_name(), "waitlist storage configured");
        Ok(store)
    }
}

// ---------------------------------------------------------------------------
// WaitlistStore
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub enum WaitlistStore {
    Sqlite(Arc<SqliteWaitlist>),
    Supabase(Arc<SupabaseWaitlist>),
    Postgres(Arc<PostgresWaitlist>),
}

impl WaitlistStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            WaitlistStore::Sqlite(_) => "sqlite",
            WaitlistStore::Supabase(_) => "supabase",
            WaitlistStore::Postgres(_) => "postgres",
        }
    }

    /// Insert one signup.
    ///
    /// Classified storage failures come back as [`LevError`]; anything else
    /// (a panicked blocking task) is a plain `anyhow` error.
    pub async fn insert(&self, email: Email) -> anyhow::Result<()> {
        let result: Result<(), InsertError> = match self {
            WaitlistStore::Sqlite(db) => {
                let db = Arc::clone(db);
                tokio::task::spawn_blocking(move || db.insert(&email))
                    .await
                    .map_err(|e| anyhow::anyhow!("task join error: {e}"))?
            }
            WaitlistStore::Supabase(client) => client.insert(&email).await,
            WaitlistStore::Postgres(pg) => pg.insert(&email).await,
        };

        if let Err(err) = &result {
            match err {
                InsertError::Duplicate => {
                    tracing::debug!(backend = self.backend_name(), "duplicate waitlist signup")
                }
                InsertError::Storage(msg) => {
                    tracing::warn!(backend = self.backend_name(), error = %msg, "waitlist insert failed")
                }
            }
        }
        result.map_err(|e| LevError::from(e).into())
    }
}
