use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::SqlitePool;

use super::{app, request, send};
use crate::common::{OTHER, OWNER};

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_create_and_fetch_list(pool: SqlitePool) {
    let app = app(&pool);

    let (status, created) = send(
        &app,
        request(
            Method::POST,
            "/api/todolist",
            OWNER,
            Some(json!({"title": "  Groceries  ", "description": "Weekly shop"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Groceries");
    assert_eq!(created["ownerId"], OWNER);
    assert_eq!(created["taskCount"], 0);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(
        &app,
        request(Method::GET, &format!("/api/todolist/{id}"), OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert!(fetched.get("createdDate").is_some());

    let (status, page) = send(&app, request(Method::GET, "/api/todolist", OWNER, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["pageNumber"], 1);
    assert_eq!(page["items"][0]["title"], "Groceries");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_foreign_list_is_hidden_on_read_and_forbidden_on_write(pool: SqlitePool) {
    let app = app(&pool);
    let (_, created) = send(
        &app,
        request(Method::POST, "/api/todolist", OWNER, Some(json!({"title": "Mine"}))),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/todolist/{id}");

    let (status, body) = send(&app, request(Method::GET, &uri, OTHER, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        request(Method::PUT, &uri, OTHER, Some(json!({"id": id, "title": "Theirs"}))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, request(Method::DELETE, &uri, OTHER, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, request(Method::DELETE, &uri, OWNER, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, request(Method::GET, &uri, OWNER, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_update_id_mismatch(pool: SqlitePool) {
    let app = app(&pool);
    let (_, created) = send(
        &app,
        request(Method::POST, "/api/todolist", OWNER, Some(json!({"title": "Mine"}))),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/todolist/{id}"),
            OWNER,
            Some(json!({"id": id + 1, "title": "Renamed"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_request_validation(pool: SqlitePool) {
    let app = app(&pool);

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/todolist", OWNER, Some(json!({"title": "   "}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/todolist?pageNumber=0", OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/todolist?pageSize=101", OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, request(Method::GET, "/api/todolist/abc", OWNER, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
