//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

use todolist::config::ApiServerConfig;
use todolist::models::{TaskPriority, TaskStatus};
use todolist::services::Services;
use todolist::types::{CreateTaskRequest, CreateTodoListRequest, TaskDto, TodoListDto};

pub const OWNER: &str = "user-a";
pub const OTHER: &str = "user-b";
pub const ASSIGNEE: &str = "user-c";

pub const TEST_BEARER_TOKEN: &str = "integration-test-token";

pub fn services(pool: &SqlitePool) -> Services {
    Services::database(pool.clone())
}

pub fn api_config() -> ApiServerConfig {
    ApiServerConfig {
        bearer_token: TEST_BEARER_TOKEN.to_string(),
        ..ApiServerConfig::default()
    }
}

/// Midnight UTC on the given day
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

pub async fn create_list(services: &Services, owner: &str, title: &str) -> TodoListDto {
    services
        .todo_lists
        .create(
            CreateTodoListRequest {
                title: title.to_string(),
                description: None,
            },
            owner,
        )
        .await
        .expect("create list")
}

pub async fn create_task(
    services: &Services,
    list_id: i64,
    owner: &str,
    title: &str,
    due_date: Option<DateTime<Utc>>,
) -> TaskDto {
    services
        .tasks
        .create(
            list_id,
            CreateTaskRequest {
                title: title.to_string(),
                description: None,
                due_date,
                priority: TaskPriority::Medium,
                status: TaskStatus::NotStarted,
            },
            owner,
        )
        .await
        .expect("create task")
}

/// A task owned by [`OWNER`] and assigned to [`ASSIGNEE`]
pub async fn assigned_task(services: &Services, title: &str) -> TaskDto {
    let list = create_list(services, OWNER, "Shared").await;
    let task = create_task(services, list.id, OWNER, title, None).await;
    services
        .assigned_tasks
        .assign(task.id, ASSIGNEE, OWNER)
        .await
        .expect("assign task");
    task
}
