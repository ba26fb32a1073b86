//! DTOs for the link shortening endpoint.
//!
//! Wire format is camelCase, preserved from the original public API.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom code characters.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The destination URL (scheme-checked by the service).
    #[validate(length(min = 1, max = 4096))]
    pub original_url: String,

    /// Optional custom short code.
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,

    /// Optional expiration as an RFC 3339 timestamp; must land on an allowed
    /// window from now. Left as a string so the service can report a proper
    /// invalid-date error instead of a deserialization failure.
    pub expires_at: Option<String>,
}

/// Response for a successfully created link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub expires_at: DateTime<Utc>,
}
