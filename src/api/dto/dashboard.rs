//! DTOs for the dashboard endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{AnnotatedLink, OwnerDashboard};
use crate::domain::status::LinkStatus;

/// One link as the dashboard renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: LinkStatus,
    pub time_remaining: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub active: usize,
    pub expiring: usize,
    pub expired: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_links: usize,
    pub total_clicks: i64,
    pub average_clicks_per_link: f64,
    pub status_counts: StatusCounts,
    pub most_clicked: Option<LinkSummary>,
    pub recent: Vec<LinkSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full dashboard payload for one owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: DashboardUser,
    pub links: Vec<LinkSummary>,
    pub stats: DashboardStats,
}

impl DashboardResponse {
    /// Maps the service aggregate into the wire shape, building absolute
    /// short URLs from the public base address.
    pub fn from_dashboard(dashboard: OwnerDashboard, base_url: &str) -> Self {
        let summarize = |a: &AnnotatedLink| LinkSummary {
            id: a.link.id,
            original_url: a.link.original_url.clone(),
            short_code: a.link.short_code.clone(),
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), a.link.short_code),
            clicks: a.link.clicks,
            created_at: a.link.created_at,
            expires_at: a.link.expires_at,
            status: a.status,
            time_remaining: a.time_remaining.clone(),
        };

        Self {
            user: DashboardUser {
                id: dashboard.user.id,
                email: dashboard.user.email,
                name: dashboard.user.name,
                created_at: dashboard.user.created_at,
            },
            links: dashboard.links.iter().map(summarize).collect(),
            stats: DashboardStats {
                total_links: dashboard.stats.total_links,
                total_clicks: dashboard.stats.total_clicks,
                average_clicks_per_link: dashboard.stats.average_clicks_per_link,
                status_counts: StatusCounts {
                    active: dashboard.stats.active_links,
                    expiring: dashboard.stats.expiring_links,
                    expired: dashboard.stats.expired_links,
                },
                most_clicked: dashboard.stats.most_clicked.as_ref().map(summarize),
                recent: dashboard.stats.recent.iter().map(summarize).collect(),
            },
        }
    }
}
