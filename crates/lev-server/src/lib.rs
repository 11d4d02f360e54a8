pub mod embed;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;
pub use store::{StorageConfig, WaitlistStore};

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Waitlist
        .route("/api/waitlist", post(routes::waitlist::join_waitlist))
        // Site
        .route("/api/site", get(routes::site::get_site))
        .route("/api/health", get(routes::health::health))
        // Booking redirects
        .route("/book-demo", get(routes::booking::book_demo))
        .route("/get-lev", get(routes::booking::default_booking))
        .route("/get-trail", get(routes::booking::default_booking))
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the site server on `0.0.0.0:{port}`.
pub async fn serve(app_state: AppState, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener, open_browser).await
}

/// Start the site server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let backend = app_state.store.backend_name();
    let app = build_router(app_state);

    tracing::info!(backend, "Lev site listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
