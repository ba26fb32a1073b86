//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::application::services::{DashboardService, RedirectService, ShortenService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<PgLinkRepository>>,
    pub redirect_service: Arc<RedirectService<PgLinkRepository>>,
    pub dashboard_service: Arc<DashboardService<PgLinkRepository, PgUserRepository>>,
    /// Direct store handle for the opportunistic sweep and health checks.
    pub link_repository: Arc<PgLinkRepository>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Public base address absolute short URLs are built from.
    pub base_url: String,
    pub db: Arc<PgPool>,
}
