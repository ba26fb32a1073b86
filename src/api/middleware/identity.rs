//! Caller identity extraction from request headers.
//!
//! The service trusts a fronting auth layer to set `X-User-Id` for
//! authenticated requests. Requests without the header are anonymous.

use axum::http::HeaderMap;

use crate::error::AppError;

/// Header carrying the authenticated account id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Reads the account id from `X-User-Id`, if present.
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is present but not a valid id.
pub fn user_id_from_headers(headers: &HeaderMap) -> Result<Option<i64>, AppError> {
    let Some(raw) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    raw.to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(Some)
        .ok_or_else(|| AppError::unauthorized("Malformed X-User-Id header"))
}
