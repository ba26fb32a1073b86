//! Link creation service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Maximum links an anonymous caller may create within one cookie lifetime.
pub const ANON_LINK_LIMIT: u32 = 3;

/// Expiration windows a caller may request, in seconds: 6h, 1d, 4d, 7d.
const ALLOWED_DURATIONS_SECS: [i64; 4] = [6 * 3600, 86_400, 4 * 86_400, 7 * 86_400];

/// Tolerance when matching a requested expiration against the allowed windows.
const DURATION_TOLERANCE_SECS: i64 = 60;

/// Expiration applied when the caller does not pick a window.
const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Collision retries for generated codes before giving up.
const MAX_GENERATE_ATTEMPTS: usize = 5;

/// Who is asking for a link.
///
/// Identity is an opaque capability handed in by the HTTP layer; the service
/// never derives it from ambient request context.
#[derive(Debug, Clone, Copy)]
pub enum Caller {
    Anonymous { usage_count: u32 },
    User(i64),
}

/// Input for a shorten request.
#[derive(Debug, Clone)]
pub struct ShortenCommand {
    pub original_url: String,
    pub custom_code: Option<String>,
    /// Requested expiration as an RFC 3339 timestamp, unparsed.
    pub expires_at: Option<String>,
    pub caller: Caller,
}

/// A freshly created link with its externally addressable short URL.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: Link,
    pub short_url: String,
}

/// Service orchestrating validation, quota, expiration policy and creation.
pub struct ShortenService<L: LinkRepository> {
    links: Arc<L>,
    base_url: String,
}

impl<L: LinkRepository> ShortenService<L> {
    /// Creates a new shortening service.
    ///
    /// `base_url` is the public address short URLs are built from.
    pub fn new(links: Arc<L>, base_url: String) -> Self {
        Self { links, base_url }
    }

    /// Creates a short link.
    ///
    /// # Policy
    ///
    /// 1. The destination must be a well-formed http(s) URL.
    /// 2. Anonymous callers at or above [`ANON_LINK_LIMIT`] are rejected.
    /// 3. A custom code must be syntactically valid and currently unused.
    /// 4. A requested expiration must parse and match an allowed window
    ///    (6h/1d/4d/7d, ±60s); absent, it defaults to 7 days.
    /// 5. Generated codes are inserted with bounded collision retries; the
    ///    unique constraint arbitrates concurrent races.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad URL, code, date or duration,
    /// [`AppError::QuotaExceeded`] when the anonymous cap is reached,
    /// [`AppError::Conflict`] when a custom code is taken, and
    /// [`AppError::Internal`] when generation retries are exhausted or the
    /// store fails.
    pub async fn shorten(&self, command: ShortenCommand) -> Result<CreatedLink, AppError> {
        validate_url(&command.original_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Caller::Anonymous { usage_count } = command.caller
            && usage_count >= ANON_LINK_LIMIT
        {
            return Err(AppError::quota_exceeded(format!(
                "Anonymous usage limit reached ({ANON_LINK_LIMIT} links)"
            )));
        }

        let expires_at = resolve_expiration(command.expires_at.as_deref(), Utc::now())?;

        let owner_id = match command.caller {
            Caller::User(id) => Some(id),
            Caller::Anonymous { .. } => None,
        };

        let link = if let Some(custom) = command.custom_code {
            validate_custom_code(&custom)?;

            if self.links.find_by_code(&custom).await?.is_some() {
                return Err(AppError::conflict(
                    "Custom code already exists",
                    json!({ "code": custom }),
                ));
            }

            // A concurrent creation can still win the race; the unique
            // constraint surfaces it as a conflict, which we pass through.
            self.links
                .create(NewLink {
                    short_code: custom,
                    original_url: command.original_url,
                    owner_id,
                    expires_at,
                })
                .await?
        } else {
            self.create_with_generated_code(command.original_url, owner_id, expires_at)
                .await?
        };

        let short_url = self.short_url(&link.short_code);

        Ok(CreatedLink { link, short_url })
    }

    /// Builds the externally addressable short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Inserts with a fresh generated code, retrying on duplicate.
    ///
    /// The store's unique constraint rejects the loser of a race; the loser
    /// retries with a new code up to [`MAX_GENERATE_ATTEMPTS`] times.
    async fn create_with_generated_code(
        &self,
        original_url: String,
        owner_id: Option<i64>,
        expires_at: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let new_link = NewLink {
                short_code: generate_code(),
                original_url: original_url.clone(),
                owner_id,
                expires_at,
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

/// Parses and validates the requested expiration, or applies the default.
fn resolve_expiration(
    requested: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, AppError> {
    let Some(raw) = requested else {
        return Ok(now + Duration::days(DEFAULT_EXPIRY_DAYS));
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            AppError::bad_request("Invalid expiration date", json!({ "reason": e.to_string() }))
        })?;

    let requested_secs = (parsed - now).num_seconds();
    let matches_allowed = ALLOWED_DURATIONS_SECS
        .iter()
        .any(|&allowed| (requested_secs - allowed).abs() < DURATION_TOLERANCE_SECS);

    if !matches_allowed {
        return Err(AppError::bad_request(
            "Invalid expiration duration. Allowed options: 6 hours, 1 day, 4 days, 7 days",
            json!({ "requested_seconds": requested_secs }),
        ));
    }

    Ok(parsed)
}
