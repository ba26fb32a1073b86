//! Lifecycle status derivation for expiring links.
//!
//! Pure functions of `(expires_at, now)`. Both entry points are deterministic:
//! for a fixed pair of instants they always produce the same label.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Derived lifecycle label of a link.
///
/// The tightest applicable window wins: a link 3 hours from expiry is also
/// within the 1-day and 2-day windows, but is reported as `expiring-very-soon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStatus {
    Active,
    ExpiringModerate,
    ExpiringSoon,
    ExpiringVerySoon,
    Expired,
}

impl LinkStatus {
    /// Returns true for any of the three `expiring-*` labels.
    pub fn is_expiring(self) -> bool {
        matches!(
            self,
            LinkStatus::ExpiringModerate | LinkStatus::ExpiringSoon | LinkStatus::ExpiringVerySoon
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::ExpiringModerate => "expiring-moderate",
            LinkStatus::ExpiringSoon => "expiring-soon",
            LinkStatus::ExpiringVerySoon => "expiring-very-soon",
            LinkStatus::Expired => "expired",
        }
    }
}

/// Derives the status of a link expiring at `expires_at`, evaluated at `now`.
pub fn status_at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> LinkStatus {
    let remaining = expires_at - now;

    if remaining <= Duration::zero() {
        LinkStatus::Expired
    } else if remaining <= Duration::hours(6) {
        LinkStatus::ExpiringVerySoon
    } else if remaining <= Duration::days(1) {
        LinkStatus::ExpiringSoon
    } else if remaining <= Duration::days(2) {
        LinkStatus::ExpiringModerate
    } else {
        LinkStatus::Active
    }
}

/// Renders the remaining lifetime as a human-readable string.
///
/// Unit selection: days if at least one full day remains, else hours, else
/// minutes, else "Expires in moments". Past-due renders as "Expired".
pub fn time_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = expires_at - now;

    if remaining <= Duration::zero() {
        return "Expired".to_string();
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes();

    if days > 0 {
        format!("{} day{} left", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} left", hours, if hours > 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("{} minute{} left", minutes, if minutes > 1 { "s" } else { "" })
    } else {
        "Expires in moments".to_string()
    }
}
