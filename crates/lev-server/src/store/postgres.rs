use std::time::Duration;

use lev_core::waitlist::InsertError;
use lev_core::Email;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Direct Postgres backend. Expects an existing `waitlist` table with a
/// unique `email` column.
pub struct PostgresWaitlist {
    pool: PgPool,
}

impl PostgresWaitlist {
    /// Build a pool without connecting. Connection problems surface on the
    /// first insert as storage errors instead of blocking startup.
    pub fn connect_lazy(url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(url)?;
        Ok(Self { pool })
    }

    pub async fn insert(&self, email: &Email) -> Result<(), InsertError> {
        sqlx::query("INSERT INTO waitlist (email) VALUES ($1)")
            .bind(email.as_str())
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(classify_sqlx_error)
    }
}

fn classify_sqlx_error(err: sqlx::Error) -> InsertError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return InsertError::Duplicate;
        }
    }
    InsertError::Storage(err.to_string())
}
