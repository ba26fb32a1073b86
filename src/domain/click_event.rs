//! Click event emitted by the redirect path.

use chrono::{DateTime, Utc};

/// A single resolution of a short code, queued for asynchronous counting.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            clicked_at: Utc::now(),
        }
    }
}
