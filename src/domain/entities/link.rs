//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use crate::domain::status::{self, LinkStatus};

/// A shortened URL with its lifecycle metadata.
///
/// The mapping between a short code and a destination URL. Every link has an
/// expiration; expired rows are removed by the background sweep, not rewritten.
/// `owner_id` is absent for anonymous submissions.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: i64,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        owner_id: Option<i64>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            owner_id,
            created_at,
            expires_at,
            clicks,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Derives the lifecycle status at the given instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> LinkStatus {
        status::status_at(self.expires_at, now)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub expires_at: DateTime<Utc>,
}
