use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use sqlx::SqlitePool;

use super::{app, send};
use crate::common::TEST_BEARER_TOKEN;

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_health_is_public(pool: SqlitePool) {
    let app = app(&pool);
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_missing_bearer_token(pool: SqlitePool) {
    let app = app(&pool);
    let request = Request::builder()
        .uri("/api/todolist")
        .header("x-user-id", "user-a")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_wrong_bearer_token(pool: SqlitePool) {
    let app = app(&pool);
    let request = Request::builder()
        .uri("/api/todolist")
        .header(header::AUTHORIZATION, "Bearer not-the-token")
        .header("x-user-id", "user-a")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_missing_caller_identity(pool: SqlitePool) {
    let app = app(&pool);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/todolist")
        .header(header::AUTHORIZATION, format!("Bearer {TEST_BEARER_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Missing caller identity");
}
