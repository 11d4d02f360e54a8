use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

use crate::error::AppError;

#[derive(Embed)]
#[folder = "site/"]
struct SiteAssets;

/// Serve embedded site assets. `/` maps to `index.html`; anything else must
/// match an embedded file exactly.
pub async fn static_handler(uri: axum::http::Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };

    match <SiteAssets as Embed>::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => AppError::not_found(format!("not found: /{path}")).into_response(),
    }
}
