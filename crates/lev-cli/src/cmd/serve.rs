use anyhow::Result;
use clap::Args;
use lev_core::config::SiteConfig;
use lev_server::{AppState, StorageConfig};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "lev-waitlist.db";

/// Storage selection shared by every command that touches the waitlist.
#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// Local SQLite database (relative paths resolve against the site root)
    #[arg(long, env = "LEV_DB", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Supabase service-role key (server-side only)
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub supabase_service_role_key: Option<String>,

    /// Postgres connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl StorageArgs {
    pub fn sqlite_path(&self, root: &Path) -> PathBuf {
        if self.db.is_absolute() {
            self.db.clone()
        } else {
            root.join(&self.db)
        }
    }

    pub fn to_config(&self, root: &Path) -> Result<StorageConfig> {
        StorageConfig::select(
            self.supabase_url.clone(),
            self.supabase_service_role_key.clone(),
            self.database_url.clone(),
            self.sqlite_path(root),
        )
    }
}

pub fn run(root: &Path, port: u16, open_browser: bool, storage: &StorageArgs) -> Result<()> {
    let site = SiteConfig::resolve(root)?;
    let storage = storage.to_config(root)?;
    tracing::debug!(?storage, "resolved storage");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let store = storage.open().await?;
        lev_server::serve(AppState::new(site, store), port, open_browser).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(db: &str) -> StorageArgs {
        StorageArgs {
            db: PathBuf::from(db),
            supabase_url: None,
            supabase_service_role_key: None,
            database_url: None,
        }
    }

    #[test]
    fn relative_db_path_is_under_root() {
        let root = Path::new("/srv/lev");
        assert_eq!(
            args("data/w.db").sqlite_path(root),
            PathBuf::from("/srv/lev/data/w.db")
        );
    }

    #[test]
    fn absolute_db_path_is_kept() {
        let root = Path::new("/srv/lev");
        assert_eq!(
            args("/var/lib/lev/w.db").sqlite_path(root),
            PathBuf::from("/var/lib/lev/w.db")
        );
    }

    #[test]
    fn defaults_select_sqlite() {
        let cfg = args(DEFAULT_DB_FILE).to_config(Path::new("/srv/lev")).unwrap();
        assert!(matches!(cfg, StorageConfig::Sqlite { .. }));
    }
}
