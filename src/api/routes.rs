//! API route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{dashboard_handler, shorten_handler};
use crate::state::AppState;

/// JSON API routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`   - Create a shortened URL
/// - `GET  /dashboard` - Caller's links with aggregate statistics
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/dashboard", get(dashboard_handler))
}
