//! Anonymous usage counter carried in a client-side cookie.
//!
//! Non-authenticated callers are capped at a fixed number of link creations,
//! tracked by an opaque integer in the `anon_usage` cookie. The counter is
//! scoped to the cookie lifetime (30 days) and resets only when the cookie
//! expires or is deleted.

use axum::http::{HeaderMap, header::COOKIE};

/// Cookie carrying the anonymous creation count.
pub const USAGE_COOKIE_NAME: &str = "anon_usage";

/// Cookie lifetime in seconds (30 days).
const USAGE_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 30;

/// Reads the usage count from the request's `Cookie` header.
///
/// A missing cookie or an unparseable value counts as zero.
pub fn read_usage(headers: &HeaderMap) -> u32 {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(USAGE_COOKIE_NAME), Some(value)) => value.parse().ok(),
                    _ => None,
                }
            })
        })
        .unwrap_or(0)
}

/// Builds the `Set-Cookie` value persisting an updated count.
pub fn build_usage_cookie(count: u32) -> String {
    format!(
        "{USAGE_COOKIE_NAME}={count}; Max-Age={USAGE_COOKIE_MAX_AGE}; Path=/; HttpOnly; SameSite=Lax"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_read_missing_cookie_is_zero() {
        assert_eq!(read_usage(&HeaderMap::new()), 0);
    }

    #[test]
    fn test_read_single_cookie() {
        assert_eq!(read_usage(&headers_with_cookie("anon_usage=2")), 2);
    }

    #[test]
    fn test_read_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; anon_usage=3; lang=en");
        assert_eq!(read_usage(&headers), 3);
    }

    #[test]
    fn test_read_garbage_value_is_zero() {
        assert_eq!(read_usage(&headers_with_cookie("anon_usage=lots")), 0);
    }

    #[test]
    fn test_build_cookie_attributes() {
        let cookie = build_usage_cookie(1);
        assert!(cookie.starts_with("anon_usage=1; "));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn test_round_trip() {
        let cookie = build_usage_cookie(2);
        let pair = cookie.split(';').next().unwrap();
        assert_eq!(read_usage(&headers_with_cookie(pair)), 2);
    }
}
