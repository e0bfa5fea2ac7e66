use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::SqlitePool;

use super::{app, request, send};
use crate::common::{ASSIGNEE, OTHER, OWNER};

async fn list_id(app: &axum::Router) -> i64 {
    let (_, created) = send(
        app,
        request(Method::POST, "/api/todolist", OWNER, Some(json!({"title": "Work"}))),
    )
    .await;
    created["id"].as_i64().unwrap()
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_task_lifecycle(pool: SqlitePool) {
    let app = app(&pool);
    let list = list_id(&app).await;

    let (status, task) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/task/{list}/tasks"),
            OWNER,
            Some(json!({"title": "Write report", "priority": "High"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "NotStarted");
    assert_eq!(task["priority"], "High");
    assert_eq!(task["isCompleted"], false);
    assert_eq!(task["todoListId"], list);
    let id = task["id"].as_i64().unwrap();

    let (status, toggled) = send(
        &app,
        request(Method::PATCH, &format!("/api/task/{id}/toggle"), OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["isCompleted"], true);
    assert_eq!(toggled["status"], "Completed");
    assert!(toggled["completedDate"].is_string());

    let (status, tasks) = send(
        &app,
        request(Method::GET, &format!("/api/task/{list}/tasks"), OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/api/task/{id}"), OTHER, None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/api/task/{id}"), OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/api/task/{id}"), OWNER, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_assignment_flow(pool: SqlitePool) {
    let app = app(&pool);
    let list = list_id(&app).await;
    let (_, task) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/task/{list}/tasks"),
            OWNER,
            Some(json!({"title": "Review"})),
        ),
    )
    .await;
    let id = task["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/api/assignedtasks/{id}/assign"),
            OWNER,
            Some(json!(ASSIGNEE)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, page) = send(&app, request(Method::GET, "/api/assignedtasks", ASSIGNEE, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["items"][0]["assignedToUserId"], ASSIGNEE);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/assignedtasks?status=Bogus", ASSIGNEE, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/api/assignedtasks/{id}/status"),
            OWNER,
            Some(json!("InProgress")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
