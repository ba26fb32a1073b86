//! User account entity.
//!
//! Accounts are owned by the external auth collaborator; this service only
//! reads the fields the dashboard displays.

use chrono::{DateTime, Utc};

/// A registered account as exposed to the dashboard aggregator.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
