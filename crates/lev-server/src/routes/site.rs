use axum::extract::State;
use axum::Json;
use lev_core::config::PublicSiteConfig;

use crate::state::AppState;

/// GET /api/site — public site settings and resolved booking links.
pub async fn get_site(State(app): State<AppState>) -> Json<PublicSiteConfig> {
    Json(app.site.public())
}
