mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use slicklink::api::handlers::redirect_handler;
use sqlx::PgPool;

fn redirect_app(state: slicklink::AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = redirect_app(state);

    common::create_test_link(&pool, "abc", "https://example.com/landing?x=1", None).await;

    let response = server.get("/abc").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/landing?x=1"
    );
}

#[sqlx::test]
async fn test_redirect_queues_click_event(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool.clone());
    let server = redirect_app(state);

    common::create_test_link(&pool, "abc", "https://example.com", None).await;

    server.get("/abc").await.assert_status(axum::http::StatusCode::FOUND);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.short_code, "abc");
}

#[sqlx::test]
async fn test_redirect_expired_but_unswept_still_resolves(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = redirect_app(state);

    common::create_expired_link(&pool, "old", "https://example.com/expired", None).await;

    let response = server.get("/old").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/expired"
    );
}

#[sqlx::test]
async fn test_redirect_unknown_code(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = redirect_app(state);

    let response = server.get("/nope").await;

    response.assert_status_not_found();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_redirect_malformed_code(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = redirect_app(state);

    let response = server.get("/bad!code").await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_redirect_does_not_queue_click_for_miss(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool);
    let server = redirect_app(state);

    server.get("/nope").await.assert_status_not_found();

    assert!(rx.try_recv().is_err());
}
