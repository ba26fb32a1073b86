//! Handler for the owner dashboard endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::api::dto::dashboard::DashboardResponse;
use crate::api::middleware::identity;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's links with aggregate statistics.
///
/// # Endpoint
///
/// `GET /api/dashboard`
///
/// Requires the `X-User-Id` header. Links are returned newest first, each
/// annotated with its status and a human-readable time remaining. Stats
/// include totals, per-status counts, the most clicked link, and the five
/// most recent links.
///
/// # Errors
///
/// - 401 Unauthorized - missing or malformed `X-User-Id`
/// - 404 Not Found - no account with that id
pub async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, AppError> {
    let owner_id = identity::user_id_from_headers(&headers)?
        .ok_or_else(|| AppError::unauthorized("Missing X-User-Id header"))?;

    let dashboard = state.dashboard_service.stats_for(owner_id).await?;

    Ok(Json(DashboardResponse::from_dashboard(
        dashboard,
        &state.base_url,
    )))
}
