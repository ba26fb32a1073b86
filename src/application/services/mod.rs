//! Business logic services.

mod dashboard_service;
mod redirect_service;
mod shorten_service;

pub use dashboard_service::{AnnotatedLink, DashboardService, OwnerDashboard, OwnerStats};
pub use redirect_service::RedirectService;
pub use shorten_service::{ANON_LINK_LIMIT, Caller, CreatedLink, ShortenCommand, ShortenService};
