use axum::extract::{Query, State};
use axum::response::Redirect;
use lev_core::booking::BookingDuration;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BookingQuery {
    pub duration: Option<String>,
}

/// GET /book-demo — redirect to the scheduling page.
///
/// `?duration=15` picks the 15-minute link when one is configured; unknown
/// durations fall back to 30 minutes.
pub async fn book_demo(
    State(app): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Redirect, AppError> {
    let duration = query
        .duration
        .as_deref()
        .and_then(|d| d.parse::<BookingDuration>().ok())
        .unwrap_or_default();
    redirect_for(&app, duration)
}

/// GET /get-lev, /get-trail — always the 30-minute link.
pub async fn default_booking(State(app): State<AppState>) -> Result<Redirect, AppError> {
    redirect_for(&app, BookingDuration::ThirtyMinutes)
}

fn redirect_for(app: &AppState, duration: BookingDuration) -> Result<Redirect, AppError> {
    let target = app.site.booking_url(duration);
    if target.is_empty() {
        return Err(AppError::not_found("booking link not configured"));
    }
    tracing::debug!(%duration, %target, "booking redirect");
    Ok(Redirect::temporary(&target))
}
