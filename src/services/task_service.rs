//! # Task Service
//!
//! Task CRUD restricted to the owner of the parent list. Assignees reach
//! their tasks through the assigned-task and comment services instead.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::authorization::{ensure_positive_id, ensure_user_id, TaskAccess};
use super::TaskService;
use crate::error::{TodoError, TodoResult};
use crate::models::{NewTask, Task, TaskStatus, TaskUpdate, TodoList};
use crate::types::{validate_request, CreateTaskRequest, TaskDto, UpdateTaskRequest};

#[derive(Debug, Clone)]
pub struct DatabaseTaskService {
    pool: SqlitePool,
}

impl DatabaseTaskService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn require_list_owner(&self, todo_list_id: i64, user_id: &str) -> TodoResult<TodoList> {
        ensure_positive_id(todo_list_id, "Todo list")?;

        let list = TodoList::find_by_id(&self.pool, todo_list_id)
            .await?
            .ok_or_else(|| {
                TodoError::not_found(format!("Todo list with ID {todo_list_id} not found"))
            })?;
        if list.owner_id != user_id {
            return Err(TodoError::forbidden(format!(
                "User is not the owner of todo list {todo_list_id}"
            )));
        }
        Ok(list)
    }

    async fn owned_task(&self, task_id: i64, user_id: &str, action: &str) -> TodoResult<Task> {
        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner(user_id, action)?;
        Ok(access.task)
    }
}

#[async_trait]
impl TaskService for DatabaseTaskService {
    async fn get_by_list(&self, todo_list_id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>> {
        ensure_user_id(user_id)?;
        self.require_list_owner(todo_list_id, user_id).await?;

        let tasks = Task::list_by_todo_list(&self.pool, todo_list_id).await?;
        debug!(todo_list_id, count = tasks.len(), "Loaded tasks for list");
        Ok(tasks.into_iter().map(TaskDto::from).collect())
    }

    async fn get_by_id(&self, task_id: i64, user_id: &str) -> TodoResult<TaskDto> {
        ensure_user_id(user_id)?;
        let task = self.owned_task(task_id, user_id, "view this task").await?;
        Ok(task.into())
    }

    async fn create(
        &self,
        todo_list_id: i64,
        request: CreateTaskRequest,
        user_id: &str,
    ) -> TodoResult<TaskDto> {
        ensure_user_id(user_id)?;
        validate_request(&request)?;
        self.require_list_owner(todo_list_id, user_id).await?;

        let task = Task::create(
            &self.pool,
            NewTask {
                title: request.title.trim().to_string(),
                description: request.description,
                due_date: request.due_date,
                priority: request.priority,
                status: request.status,
                todo_list_id,
                assigned_to_user_id: Some(user_id.to_string()),
            },
        )
        .await?;

        info!(task_id = task.id, todo_list_id, user_id = %user_id, "Created task");
        Ok(task.into())
    }

    async fn update(&self, request: UpdateTaskRequest, user_id: &str) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        validate_request(&request)?;
        self.owned_task(request.id, user_id, "update this task")
            .await?;

        let update = TaskUpdate {
            title: request.title.trim().to_string(),
            description: request.description,
            priority: request.priority,
            status: request.status,
            due_date: request.due_date,
        };
        Task::update(&self.pool, request.id, &update)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Task with ID {} not found", request.id)))?;

        info!(task_id = request.id, user_id = %user_id, status = %update.status, "Updated task");
        Ok(())
    }

    async fn delete(&self, task_id: i64, user_id: &str) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        self.owned_task(task_id, user_id, "delete this task").await?;

        Task::delete(&self.pool, task_id).await?;

        info!(task_id, user_id = %user_id, "Deleted task");
        Ok(())
    }

    async fn toggle_completion(&self, task_id: i64, user_id: &str) -> TodoResult<TaskDto> {
        ensure_user_id(user_id)?;
        let task = self
            .owned_task(task_id, user_id, "change this task")
            .await?;

        // Un-completing keeps whatever status the task already has
        let is_completed = !task.is_completed;
        let (completed_date, status) = if is_completed {
            (Some(Utc::now()), TaskStatus::Completed)
        } else {
            (None, task.status)
        };

        let updated = Task::set_completion(&self.pool, task_id, is_completed, completed_date, status)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Task with ID {task_id} not found")))?;

        info!(task_id, user_id = %user_id, is_completed, "Toggled task completion");
        Ok(updated.into())
    }
}
