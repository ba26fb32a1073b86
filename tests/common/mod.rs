#![allow(dead_code)]

use chrono::{Duration, Utc};
use slicklink::application::services::{DashboardService, RedirectService, ShortenService};
use slicklink::domain::click_event::ClickEvent;
use slicklink::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use slicklink::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://short.test";

pub async fn create_test_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind("Test User")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str, owner_id: Option<i64>) {
    create_link_expiring_in(pool, code, url, owner_id, Duration::days(7)).await;
}

pub async fn create_expired_link(pool: &PgPool, code: &str, url: &str, owner_id: Option<i64>) {
    create_link_expiring_in(pool, code, url, owner_id, Duration::hours(-1)).await;
}

pub async fn create_link_expiring_in(
    pool: &PgPool,
    code: &str,
    url: &str,
    owner_id: Option<i64>,
    offset: Duration,
) {
    sqlx::query(
        "INSERT INTO links (short_code, original_url, owner_id, expires_at) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(code)
    .bind(url)
    .bind(owner_id)
    .bind(Utc::now() + offset)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn set_clicks(pool: &PgPool, code: &str, clicks: i64) {
    sqlx::query("UPDATE links SET clicks = $1 WHERE short_code = $2")
        .bind(clicks)
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let state = AppState {
        shorten_service: Arc::new(ShortenService::new(
            link_repository.clone(),
            BASE_URL.to_string(),
        )),
        redirect_service: Arc::new(RedirectService::new(link_repository.clone(), tx.clone())),
        dashboard_service: Arc::new(DashboardService::new(
            link_repository.clone(),
            user_repository,
        )),
        link_repository,
        click_sender: tx,
        base_url: BASE_URL.to_string(),
        db: pool,
    };

    (state, rx)
}
