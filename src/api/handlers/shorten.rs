//! Handler for link shortening endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::identity;
use crate::application::services::{Caller, ShortenCommand};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::is_valid_url;
use crate::utils::usage_cookie;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "customCode": "my-link",                  // optional
///   "expiresAt": "2026-01-15T12:00:00Z"       // optional
/// }
/// ```
///
/// # Anonymous Quota
///
/// Anonymous callers (no `X-User-Id` header) are limited by a counter
/// cookie. The counter advances only once a request clears URL validation
/// and the quota gate; malformed submissions never burn the quota.
///
/// # Errors
///
/// - 400 Bad Request - invalid URL, custom code, or expiration
/// - 403 Forbidden - anonymous quota exhausted
/// - 409 Conflict - custom code already taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Response {
    let usage = usage_cookie::read_usage(&headers);

    let caller = match identity::user_id_from_headers(&headers) {
        Ok(Some(id)) => Caller::User(id),
        Ok(None) => Caller::Anonymous { usage_count: usage },
        Err(err) => return err.into_response(),
    };
    let anonymous = matches!(caller, Caller::Anonymous { .. });

    if let Err(err) = payload.validate() {
        return AppError::from(err).into_response();
    }

    // Cookie eligibility mirrors the creation flow's ordering: the counter
    // advances only after URL validation and the quota gate have passed.
    let url_ok = is_valid_url(&payload.original_url);

    let command = ShortenCommand {
        original_url: payload.original_url,
        custom_code: payload.custom_code,
        expires_at: payload.expires_at,
        caller,
    };

    match state.shorten_service.shorten(command).await {
        Ok(created) => {
            spawn_expiry_sweep(&state);

            let body = Json(ShortenResponse {
                short_url: created.short_url,
                short_code: created.link.short_code,
                expires_at: created.link.expires_at,
            });

            with_usage_cookie((StatusCode::CREATED, body).into_response(), anonymous, usage)
        }
        Err(err) => {
            // An invalid URL or a rejected caller gets no cookie update;
            // errors past the gate (taken code, bad duration) still count.
            let over_quota = matches!(err, AppError::QuotaExceeded { .. });
            let response = err.into_response();
            if over_quota || !url_ok {
                response
            } else {
                with_usage_cookie(response, anonymous, usage)
            }
        }
    }
}

/// Appends the incremented usage cookie for anonymous callers.
fn with_usage_cookie(mut response: Response, anonymous: bool, usage: u32) -> Response {
    if !anonymous {
        return response;
    }

    let cookie = usage_cookie::build_usage_cookie(usage.saturating_add(1));
    if let Ok(value) = cookie.parse::<HeaderValue>() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

/// Piggybacks a cleanup pass on link creation so expired rows get pruned
/// between scheduled sweeps (fire-and-forget).
fn spawn_expiry_sweep(state: &AppState) {
    let links = state.link_repository.clone();
    tokio::spawn(async move {
        match links.delete_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(n) => tracing::debug!("Opportunistic sweep removed {n} expired links"),
            Err(e) => tracing::warn!("Opportunistic sweep failed: {e}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_cookie_saturates_at_max_count() {
        let response = with_usage_cookie(().into_response(), true, u32::MAX);

        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(
            cookie
                .to_str()
                .unwrap()
                .starts_with(&format!("anon_usage={}", u32::MAX))
        );
    }

    #[test]
    fn test_usage_cookie_skipped_for_authenticated_callers() {
        let response = with_usage_cookie(().into_response(), false, 0);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
