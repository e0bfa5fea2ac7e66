use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::models::{Comment, Tag, TagWithCount, Task, TaskPriority, TaskStatus, TodoListWithCount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub task_count: i64,
    pub owner_id: String,
}

impl From<TodoListWithCount> for TodoListDto {
    fn from(row: TodoListWithCount) -> Self {
        Self {
            id: row.list.id,
            title: row.list.title,
            description: row.list.description,
            created_date: row.list.created_date,
            task_count: row.task_count,
            owner_id: row.list.owner_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub todo_list_id: i64,
    pub assigned_to_user_id: Option<String>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            created_date: task.created_date,
            due_date: task.due_date,
            completed_date: task.completed_date,
            is_completed: task.is_completed,
            status: task.status,
            priority: task.priority,
            todo_list_id: task.todo_list_id,
            assigned_to_user_id: task.assigned_to_user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub task_id: i64,
    pub content: String,
    pub created_date: DateTime<Utc>,
    pub created_by: String,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            task_id: comment.task_id,
            content: comment.content,
            created_date: comment.created_date,
            created_by: comment.created_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub task_count: i64,
}

impl From<TagWithCount> for TagDto {
    fn from(row: TagWithCount) -> Self {
        Self {
            id: row.id,
            name: row.name,
            task_count: row.task_count,
        }
    }
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            task_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoListRequest {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoListRequest {
    pub id: i64,
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub id: i64,
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::validate_request;
    use serde_json::json;

    #[test]
    fn test_todo_list_dto_uses_camel_case() {
        let dto = TodoListDto {
            id: 7,
            title: "Groceries".into(),
            description: None,
            created_date: Utc::now(),
            task_count: 3,
            owner_id: "user-a".into(),
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["taskCount"], 3);
        assert_eq!(value["ownerId"], "user-a");
        assert!(value.get("createdDate").is_some());
    }

    #[test]
    fn test_create_task_request_defaults() {
        let request: CreateTaskRequest =
            serde_json::from_value(json!({"title": "Buy milk"})).unwrap();
        assert_eq!(request.priority, TaskPriority::Medium);
        assert!(request.due_date.is_none());
        assert_eq!(request.status, TaskStatus::NotStarted);
        assert!(validate_request(&request).is_ok());

        let request: CreateTaskRequest =
            serde_json::from_value(json!({"title": "Buy milk", "status": "Completed"})).unwrap();
        assert_eq!(request.status, TaskStatus::Completed);
    }

    #[test]
    fn test_blank_title_fails_validation() {
        let request = CreateTodoListRequest {
            title: "   ".into(),
            description: None,
        };
        let err = validate_request(&request).unwrap_err();
        assert!(err.to_string().contains("title"), "{err}");
    }

    #[test]
    fn test_title_length_limit() {
        let request = CreateTodoListRequest {
            title: "x".repeat(201),
            description: None,
        };
        assert!(validate_request(&request).is_err());

        let request = CreateTodoListRequest {
            title: "x".repeat(200),
            description: Some("y".repeat(1000)),
        };
        assert!(validate_request(&request).is_ok());
    }
}
