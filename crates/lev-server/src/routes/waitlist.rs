use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lev_core::Email;

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/waitlist — add an email to the waitlist.
///
/// The body is parsed regardless of `Content-Type`. Unparseable JSON is a
/// server error rather than a validation failure.
pub async fn join_waitlist(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let payload: serde_json::Value = serde_json::from_slice(&body)?;
    let email = Email::from_json(&payload)?;

    app.store.insert(email).await?;
    tracing::info!(backend = app.store.backend_name(), "waitlist signup recorded");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true })),
    ))
}
