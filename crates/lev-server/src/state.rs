use std::sync::Arc;

use lev_core::config::SiteConfig;

use crate::store::WaitlistStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub store: WaitlistStore,
}

impl AppState {
    pub fn new(site: SiteConfig, store: WaitlistStore) -> Self {
        Self {
            site: Arc::new(site),
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lev_core::waitlist::SqliteWaitlist;

    #[test]
    fn new_state_keeps_site_config() {
        let store = WaitlistStore::Sqlite(Arc::new(SqliteWaitlist::open_in_memory().unwrap()));
        let state = AppState::new(SiteConfig::default(), store);
        assert_eq!(state.site.calcom_30min_url, "https://cal.com/lev.call");
        assert_eq!(state.store.backend_name(), "sqlite");
    }
}
