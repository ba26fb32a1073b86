//! Per-owner dashboard aggregation service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, UserAccount};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::domain::status::{self, LinkStatus};
use crate::error::AppError;

/// A link annotated with its derived lifecycle information.
#[derive(Debug, Clone)]
pub struct AnnotatedLink {
    pub link: Link,
    pub status: LinkStatus,
    pub time_remaining: String,
}

/// Aggregate statistics over one owner's links.
#[derive(Debug, Clone)]
pub struct OwnerStats {
    pub total_links: usize,
    pub total_clicks: i64,
    /// Average clicks per link, rounded to 2 decimals. Zero when no links.
    pub average_clicks_per_link: f64,
    pub active_links: usize,
    pub expiring_links: usize,
    pub expired_links: usize,
    /// The single most-clicked link; first in input order wins ties.
    pub most_clicked: Option<AnnotatedLink>,
    /// The 5 most recently created links.
    pub recent: Vec<AnnotatedLink>,
}

/// Everything the dashboard renders for one owner.
#[derive(Debug, Clone)]
pub struct OwnerDashboard {
    pub user: UserAccount,
    pub links: Vec<AnnotatedLink>,
    pub stats: OwnerStats,
}

/// Read-only aggregator over the URL store and account data.
pub struct DashboardService<L: LinkRepository, U: UserRepository> {
    links: Arc<L>,
    users: Arc<U>,
}

impl<L: LinkRepository, U: UserRepository> DashboardService<L, U> {
    /// Creates a new dashboard service.
    pub fn new(links: Arc<L>, users: Arc<U>) -> Self {
        Self { links, users }
    }

    /// Loads an owner's links and computes aggregate statistics.
    ///
    /// Read-only: no mutation, expired links stay visible until the sweep
    /// removes them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown account and
    /// [`AppError::Internal`] on database errors.
    pub async fn stats_for(&self, owner_id: i64) -> Result<OwnerDashboard, AppError> {
        let user = self
            .users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found", json!({ "id": owner_id })))?;

        let links = self.links.list_by_owner(owner_id).await?;
        let now = Utc::now();

        Ok(build_dashboard(user, links, now))
    }
}

/// Pure aggregation over an already-loaded link set.
fn build_dashboard(user: UserAccount, links: Vec<Link>, now: DateTime<Utc>) -> OwnerDashboard {
    let annotated: Vec<AnnotatedLink> = links
        .into_iter()
        .map(|link| {
            let status = link.status_at(now);
            let time_remaining = status::time_remaining(link.expires_at, now);
            AnnotatedLink {
                link,
                status,
                time_remaining,
            }
        })
        .collect();

    let total_links = annotated.len();
    let total_clicks: i64 = annotated.iter().map(|a| a.link.clicks).sum();

    let average_clicks_per_link = if total_links > 0 {
        (total_clicks as f64 / total_links as f64 * 100.0).round() / 100.0
    } else {
        0.0
    };

    let mut active_links = 0;
    let mut expiring_links = 0;
    let mut expired_links = 0;
    for a in &annotated {
        match a.status {
            LinkStatus::Expired => expired_links += 1,
            s if s.is_expiring() => expiring_links += 1,
            _ => active_links += 1,
        }
    }

    // Strict comparison keeps the first-encountered link on ties.
    let most_clicked = annotated
        .iter()
        .fold(None::<&AnnotatedLink>, |best, a| match best {
            Some(b) if a.link.clicks > b.link.clicks => Some(a),
            None => Some(a),
            _ => best,
        })
        .cloned();

    // Input order is created_at DESC from the repository.
    let recent = annotated.iter().take(5).cloned().collect();

    let stats = OwnerStats {
        total_links,
        total_clicks,
        average_clicks_per_link,
        active_links,
        expiring_links,
        expired_links,
        most_clicked,
        recent,
    };

    OwnerDashboard {
        user,
        links: annotated,
        stats,
    }
}
