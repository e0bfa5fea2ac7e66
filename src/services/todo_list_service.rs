//! # Todo List Service
//!
//! Lists are private to their owner. The by-id read hides lists owned by
//! someone else behind `None`; mutations report them as authorization errors.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::authorization::{ensure_positive_id, ensure_user_id};
use super::TodoListService;
use crate::error::{TodoError, TodoResult};
use crate::models::{NewTodoList, Task, TodoList};
use crate::types::{
    validate_request, CreateTodoListRequest, PageRequest, PagedResult, TaskDto, TodoListDto,
    UpdateTodoListRequest,
};

#[derive(Debug, Clone)]
pub struct DatabaseTodoListService {
    pool: SqlitePool,
}

impl DatabaseTodoListService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn require_owner(&self, id: i64, user_id: &str, action: &str) -> TodoResult<()> {
        if TodoList::is_owned_by(&self.pool, id, user_id).await? {
            return Ok(());
        }
        warn!(
            todo_list_id = id,
            user_id = %user_id,
            action = action,
            "Rejected non-owner access to todo list"
        );
        Err(TodoError::forbidden(format!(
            "User is not the owner of todo list {id}"
        )))
    }
}

#[async_trait]
impl TodoListService for DatabaseTodoListService {
    async fn get_paged(
        &self,
        owner_id: &str,
        page: PageRequest,
    ) -> TodoResult<PagedResult<TodoListDto>> {
        ensure_user_id(owner_id)?;
        page.validate()?;

        let lists = TodoList::list_by_owner_with_counts(&self.pool, owner_id).await?;
        let result = page.slice(lists).map(TodoListDto::from);

        debug!(
            owner_id = %owner_id,
            page_number = page.page_number,
            total_count = result.total_count,
            "Loaded todo list page"
        );
        Ok(result)
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> TodoResult<Option<TodoListDto>> {
        ensure_positive_id(id, "Todo list")?;
        ensure_user_id(user_id)?;

        let list = TodoList::find_with_count(&self.pool, id).await?;
        Ok(list
            .filter(|row| row.list.owner_id == user_id)
            .map(TodoListDto::from))
    }

    async fn get_tasks(&self, id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>> {
        ensure_positive_id(id, "Todo list")?;
        ensure_user_id(user_id)?;

        let list = TodoList::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Todo list with ID {id} not found")))?;
        if list.owner_id != user_id {
            return Err(TodoError::forbidden(format!(
                "User is not the owner of todo list {id}"
            )));
        }

        let tasks = Task::list_by_todo_list(&self.pool, id).await?;
        Ok(tasks.into_iter().map(TaskDto::from).collect())
    }

    async fn create(
        &self,
        request: CreateTodoListRequest,
        owner_id: &str,
    ) -> TodoResult<TodoListDto> {
        ensure_user_id(owner_id)?;
        validate_request(&request)?;

        let list = TodoList::create(
            &self.pool,
            NewTodoList {
                title: request.title.trim().to_string(),
                description: request.description,
                owner_id: owner_id.to_string(),
            },
        )
        .await?;

        info!(todo_list_id = list.id, owner_id = %owner_id, "Created todo list");
        Ok(TodoListDto {
            id: list.id,
            title: list.title,
            description: list.description,
            created_date: list.created_date,
            task_count: 0,
            owner_id: list.owner_id,
        })
    }

    async fn update(&self, request: UpdateTodoListRequest, user_id: &str) -> TodoResult<()> {
        ensure_positive_id(request.id, "Todo list")?;
        ensure_user_id(user_id)?;
        validate_request(&request)?;
        self.require_owner(request.id, user_id, "update").await?;

        TodoList::update(
            &self.pool,
            request.id,
            request.title.trim(),
            request.description.as_deref(),
        )
        .await?;

        info!(todo_list_id = request.id, user_id = %user_id, "Updated todo list");
        Ok(())
    }

    async fn delete(&self, id: i64, user_id: &str) -> TodoResult<()> {
        ensure_positive_id(id, "Todo list")?;
        ensure_user_id(user_id)?;
        self.require_owner(id, user_id, "delete").await?;

        TodoList::delete(&self.pool, id).await?;

        info!(todo_list_id = id, user_id = %user_id, "Deleted todo list");
        Ok(())
    }

    async fn is_owner(&self, id: i64, user_id: &str) -> TodoResult<bool> {
        ensure_positive_id(id, "Todo list")?;
        Ok(TodoList::is_owned_by(&self.pool, id, user_id).await?)
    }
}
