//! # Service Layer
//!
//! Business rules for todo lists, tasks, assignments, comments, tags and
//! search. Every service is a trait with two implementations:
//!
//! ```text
//! Handler / Page -> dyn XxxService -> DatabaseXxxService -> models (SQL)
//!                                  \-> TodoApiClient     -> HTTP API
//! ```
//!
//! The database implementations enforce ownership and validate paging. The
//! remote implementation trusts the API to do both.

pub mod account_service;
pub mod assigned_tasks_service;
pub mod authorization;
pub mod comment_service;
pub mod search_service;
pub mod tag_service;
pub mod task_service;
pub mod todo_list_service;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::TodoResult;
use crate::models::TaskStatus;
use crate::types::{
    AssignedTasksQuery, CommentDto, CreateTaskRequest, CreateTodoListRequest, PageRequest,
    PagedResult, TagDto, TaskDto, TaskSearchQuery, TodoListDto, UpdateTaskRequest,
    UpdateTodoListRequest,
};

pub use account_service::{AccountService, LoginRequest, RegisterRequest};
pub use assigned_tasks_service::DatabaseAssignedTasksService;
pub use comment_service::DatabaseCommentService;
pub use search_service::DatabaseSearchService;
pub use tag_service::DatabaseTagService;
pub use task_service::DatabaseTaskService;
pub use todo_list_service::DatabaseTodoListService;

#[async_trait]
pub trait TodoListService: Send + Sync {
    /// The caller's lists, newest first
    async fn get_paged(
        &self,
        owner_id: &str,
        page: PageRequest,
    ) -> TodoResult<PagedResult<TodoListDto>>;

    /// `None` when the list is missing or owned by someone else
    async fn get_by_id(&self, id: i64, user_id: &str) -> TodoResult<Option<TodoListDto>>;

    async fn get_tasks(&self, id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>>;

    async fn create(
        &self,
        request: CreateTodoListRequest,
        owner_id: &str,
    ) -> TodoResult<TodoListDto>;

    async fn update(&self, request: UpdateTodoListRequest, user_id: &str) -> TodoResult<()>;

    async fn delete(&self, id: i64, user_id: &str) -> TodoResult<()>;

    async fn is_owner(&self, id: i64, user_id: &str) -> TodoResult<bool>;
}

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn get_by_list(&self, todo_list_id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>>;

    async fn get_by_id(&self, task_id: i64, user_id: &str) -> TodoResult<TaskDto>;

    /// The new task is assigned to its creator
    async fn create(
        &self,
        todo_list_id: i64,
        request: CreateTaskRequest,
        user_id: &str,
    ) -> TodoResult<TaskDto>;

    async fn update(&self, request: UpdateTaskRequest, user_id: &str) -> TodoResult<()>;

    async fn delete(&self, task_id: i64, user_id: &str) -> TodoResult<()>;

    async fn toggle_completion(&self, task_id: i64, user_id: &str) -> TodoResult<TaskDto>;
}

#[async_trait]
pub trait AssignedTasksService: Send + Sync {
    async fn get_assigned(
        &self,
        user_id: &str,
        query: &AssignedTasksQuery,
    ) -> TodoResult<PagedResult<TaskDto>>;

    /// Only the current assignee may change status
    async fn change_status(&self, task_id: i64, status: TaskStatus, user_id: &str)
        -> TodoResult<()>;

    /// Only the list owner may reassign
    async fn assign(&self, task_id: i64, assignee_id: &str, user_id: &str) -> TodoResult<()>;
}

#[async_trait]
pub trait CommentService: Send + Sync {
    async fn get_by_task(&self, task_id: i64, user_id: &str) -> TodoResult<Vec<CommentDto>>;

    async fn add(&self, task_id: i64, content: &str, user_id: &str) -> TodoResult<CommentDto>;

    async fn update(&self, comment_id: i64, content: &str, user_id: &str) -> TodoResult<()>;

    async fn delete(&self, comment_id: i64, user_id: &str) -> TodoResult<()>;
}

#[async_trait]
pub trait TagService: Send + Sync {
    async fn get_all(&self, user_id: &str) -> TodoResult<Vec<TagDto>>;

    async fn get_by_task(&self, task_id: i64, user_id: &str) -> TodoResult<Vec<TagDto>>;

    async fn get_tasks_by_tag(&self, tag_id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>>;

    async fn add_to_task(&self, task_id: i64, name: &str, user_id: &str) -> TodoResult<TagDto>;

    async fn remove_from_task(&self, task_id: i64, tag_id: i64, user_id: &str) -> TodoResult<()>;
}

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(
        &self,
        user_id: &str,
        query: &TaskSearchQuery,
    ) -> TodoResult<PagedResult<TaskDto>>;
}

/// One data source behind every service trait, chosen at composition time
#[derive(Clone)]
pub struct Services {
    pub todo_lists: Arc<dyn TodoListService>,
    pub tasks: Arc<dyn TaskService>,
    pub assigned_tasks: Arc<dyn AssignedTasksService>,
    pub comments: Arc<dyn CommentService>,
    pub tags: Arc<dyn TagService>,
    pub search: Arc<dyn SearchService>,
}

impl Services {
    /// In-process implementations against `pool`
    pub fn database(pool: SqlitePool) -> Self {
        Self {
            todo_lists: Arc::new(DatabaseTodoListService::new(pool.clone())),
            tasks: Arc::new(DatabaseTaskService::new(pool.clone())),
            assigned_tasks: Arc::new(DatabaseAssignedTasksService::new(pool.clone())),
            comments: Arc::new(DatabaseCommentService::new(pool.clone())),
            tags: Arc::new(DatabaseTagService::new(pool.clone())),
            search: Arc::new(DatabaseSearchService::new(pool)),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
