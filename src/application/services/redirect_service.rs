//! Short code resolution service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_well_formed_code;

/// Resolves codes to their destination and queues click events.
pub struct RedirectService<L: LinkRepository> {
    links: Arc<L>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl<L: LinkRepository> RedirectService<L> {
    /// Creates a new redirect service.
    pub fn new(links: Arc<L>, click_tx: mpsc::Sender<ClickEvent>) -> Self {
        Self { links, click_tx }
    }

    /// Resolves a short code to its stored link.
    ///
    /// Expired-but-unswept records still resolve; the sweep is a cleanup job,
    /// not the enforcement mechanism for expiry. The click event is
    /// fire-and-forget over a bounded channel: a full queue drops the click
    /// rather than delaying the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a syntactically invalid code and
    /// [`AppError::NotFound`] when no record matches.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        if !is_well_formed_code(code) {
            return Err(AppError::bad_request(
                "Invalid short code",
                json!({ "code": code }),
            ));
        }

        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

        let _ = self.click_tx.try_send(ClickEvent::new(code));

        Ok(link)
    }
}
