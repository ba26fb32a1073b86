//! Background worker draining the click queue.
//!
//! Click counting is advisory analytics: a failed increment is logged and
//! dropped, never retried synchronously and never surfaced to the redirect
//! path. Lost updates under concurrent clicks are acceptable.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Drains click events until the channel closes.
pub async fn run_click_worker<L: LinkRepository>(
    mut rx: mpsc::Receiver<ClickEvent>,
    links: Arc<L>,
) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = links.increment_clicks(&event.short_code).await {
            tracing::warn!(
                code = %event.short_code,
                "failed to record click: {e}"
            );
        }
    }

    tracing::debug!("click queue closed, worker exiting");
}
