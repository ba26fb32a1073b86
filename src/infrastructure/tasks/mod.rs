//! Background tasks owned by the process lifecycle.
//!
//! Periodic work is registered explicitly at bootstrap and aborted on
//! shutdown, never started as a module-load side effect. Task failures are
//! logged; the loop simply runs again at the next tick.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::domain::repositories::LinkRepository;

/// Registry of long-lived background tasks.
///
/// Owned by `server::run`; dropping the registry without calling
/// [`BackgroundTasks::shutdown`] leaves tasks running, so the server aborts
/// them explicitly once the listener stops.
#[derive(Default)]
pub struct BackgroundTasks {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named task.
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("starting background task: {name}");
        self.handles.push((name, tokio::spawn(future)));
    }

    /// Aborts every registered task.
    pub fn shutdown(self) {
        for (name, handle) in self.handles {
            tracing::info!("stopping background task: {name}");
            handle.abort();
        }
    }
}

/// Periodically deletes expired link records.
///
/// Deletion is idempotent and keyed on a monotonic clock comparison, so this
/// loop races harmlessly with the opportunistic sweep on the shorten path.
pub async fn run_expiry_sweep<L: LinkRepository>(links: Arc<L>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick fires immediately; clean up anything left from downtime.
    loop {
        ticker.tick().await;
        match links.delete_expired(Utc::now()).await {
            Ok(0) => tracing::debug!("expiry sweep: nothing to delete"),
            Ok(count) => tracing::info!("expiry sweep: deleted {count} expired links"),
            Err(e) => tracing::error!("expiry sweep failed: {e}"),
        }
    }
}

/// Periodically pings the database so managed instances do not idle out.
pub async fn run_db_keepalive(pool: Arc<PgPool>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await; // skip the immediate tick, the pool was just used
    loop {
        ticker.tick().await;
        match sqlx::query("SELECT 1").execute(pool.as_ref()).await {
            Ok(_) => tracing::debug!("database keep-alive ping ok"),
            Err(e) => tracing::warn!("database keep-alive ping failed: {e}"),
        }
    }
}
