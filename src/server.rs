//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker spawning, and Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::{DashboardService, RedirectService, ShortenService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use crate::infrastructure::tasks::{BackgroundTasks, run_db_keepalive, run_expiry_sweep};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Database migrations
/// - Background click worker
/// - Scheduled expired-link sweep and pool keepalive
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let mut tasks = BackgroundTasks::new();
    tasks.spawn(
        "click-worker",
        run_click_worker(click_rx, link_repository.clone()),
    );
    tasks.spawn(
        "expiry-sweep",
        run_expiry_sweep(
            link_repository.clone(),
            Duration::from_secs(config.sweep_interval_hours * 3600),
        ),
    );
    tasks.spawn(
        "db-keepalive",
        run_db_keepalive(
            pool.clone(),
            Duration::from_secs(config.db_keepalive_interval_secs),
        ),
    );
    tracing::info!("Background tasks started");

    let state = AppState {
        shorten_service: Arc::new(ShortenService::new(
            link_repository.clone(),
            config.base_url.clone(),
        )),
        redirect_service: Arc::new(RedirectService::new(
            link_repository.clone(),
            click_tx.clone(),
        )),
        dashboard_service: Arc::new(DashboardService::new(
            link_repository.clone(),
            user_repository,
        )),
        link_repository,
        click_sender: click_tx,
        base_url: config.base_url.clone(),
        db: pool,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tasks.shutdown();
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves when SIGINT (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
