use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lev_core::error::LevError;

/// Body of every 500 whose cause is not a storage failure. Internal details
/// only reach the logs.
pub const SERVER_ERROR: &str = "Server error";

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 404 Not Found errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain without touching the `LevError` enum.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            return (StatusCode::NOT_FOUND, n.0.clone());
        }

        match self.0.downcast_ref::<LevError>() {
            Some(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            Some(LevError::Storage(msg)) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
