//! Service trait implementations backed by the HTTP API.
//!
//! Paging and ownership are enforced server side; this side only maps
//! routes and decodes responses.

use async_trait::async_trait;
use reqwest::Method;

use super::TodoApiClient;
use crate::error::{TodoError, TodoResult};
use crate::models::TaskStatus;
use crate::services::{
    AssignedTasksService, CommentService, SearchService, TagService, TaskService,
    TodoListService,
};
use crate::types::{
    AssignedTasksQuery, CommentDto, CreateTaskRequest, CreateTodoListRequest, PageRequest,
    PagedResult, TagDto, TaskDto, TaskSearchQuery, TodoListDto, UpdateTaskRequest,
    UpdateTodoListRequest,
};

const NO_BODY: Option<&()> = None;

fn page_params(page: &PageRequest) -> Vec<(&'static str, String)> {
    vec![
        ("pageNumber", page.page_number.to_string()),
        ("pageSize", page.page_size.to_string()),
    ]
}

#[async_trait]
impl TodoListService for TodoApiClient {
    async fn get_paged(
        &self,
        owner_id: &str,
        page: PageRequest,
    ) -> TodoResult<PagedResult<TodoListDto>> {
        let url = self.url("/api/todolist", &page_params(&page))?;
        self.get_json(url, owner_id, "list todo lists").await
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> TodoResult<Option<TodoListDto>> {
        let url = self.url(&format!("/api/todolist/{id}"), &[])?;
        match self.get_json(url, user_id, "get todo list").await {
            Ok(list) => Ok(Some(list)),
            Err(TodoError::NotFound(_)) => Ok(None),
            Err(other) => Err(other),
        }
    }

    async fn get_tasks(&self, id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>> {
        let url = self.url(&format!("/api/todolist/{id}/tasks"), &[])?;
        self.get_json(url, user_id, "get todo list tasks").await
    }

    async fn create(
        &self,
        request: CreateTodoListRequest,
        owner_id: &str,
    ) -> TodoResult<TodoListDto> {
        let url = self.url("/api/todolist", &[])?;
        self.send_json(Method::POST, url, &request, owner_id, "create todo list")
            .await
    }

    async fn update(&self, request: UpdateTodoListRequest, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/todolist/{}", request.id), &[])?;
        self.send_no_content(Method::PUT, url, Some(&request), user_id, "update todo list")
            .await
    }

    async fn delete(&self, id: i64, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/todolist/{id}"), &[])?;
        self.send_no_content(Method::DELETE, url, NO_BODY, user_id, "delete todo list")
            .await
    }

    async fn is_owner(&self, id: i64, user_id: &str) -> TodoResult<bool> {
        let list = TodoListService::get_by_id(self, id, user_id).await?;
        Ok(list.is_some_and(|l| l.owner_id == user_id))
    }
}

#[async_trait]
impl TaskService for TodoApiClient {
    async fn get_by_list(&self, todo_list_id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>> {
        let url = self.url(&format!("/api/task/{todo_list_id}/tasks"), &[])?;
        self.get_json(url, user_id, "list tasks").await
    }

    async fn get_by_id(&self, task_id: i64, user_id: &str) -> TodoResult<TaskDto> {
        let url = self.url(&format!("/api/task/{task_id}"), &[])?;
        self.get_json(url, user_id, "get task").await
    }

    async fn create(
        &self,
        todo_list_id: i64,
        request: CreateTaskRequest,
        user_id: &str,
    ) -> TodoResult<TaskDto> {
        let url = self.url(&format!("/api/task/{todo_list_id}/tasks"), &[])?;
        self.send_json(Method::POST, url, &request, user_id, "create task")
            .await
    }

    async fn update(&self, request: UpdateTaskRequest, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/task/{}", request.id), &[])?;
        self.send_no_content(Method::PUT, url, Some(&request), user_id, "update task")
            .await
    }

    async fn delete(&self, task_id: i64, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/task/{task_id}"), &[])?;
        self.send_no_content(Method::DELETE, url, NO_BODY, user_id, "delete task")
            .await
    }

    async fn toggle_completion(&self, task_id: i64, user_id: &str) -> TodoResult<TaskDto> {
        let url = self.url(&format!("/api/task/{task_id}/toggle"), &[])?;
        self.send_json(Method::PATCH, url, &(), user_id, "toggle task")
            .await
    }
}

#[async_trait]
impl AssignedTasksService for TodoApiClient {
    async fn get_assigned(
        &self,
        user_id: &str,
        query: &AssignedTasksQuery,
    ) -> TodoResult<PagedResult<TaskDto>> {
        let mut params = page_params(&query.page);
        params.push(("sortBy", query.sort_by.as_str().to_string()));
        if let Some(status) = query.status {
            params.push(("status", status.as_str().to_string()));
        }
        let url = self.url("/api/assignedtasks", &params)?;
        self.get_json(url, user_id, "list assigned tasks").await
    }

    async fn change_status(
        &self,
        task_id: i64,
        status: TaskStatus,
        user_id: &str,
    ) -> TodoResult<()> {
        let url = self.url(&format!("/api/assignedtasks/{task_id}/status"), &[])?;
        self.send_no_content(Method::PATCH, url, Some(&status), user_id, "change task status")
            .await
    }

    async fn assign(&self, task_id: i64, assignee_id: &str, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/assignedtasks/{task_id}/assign"), &[])?;
        self.send_no_content(Method::PATCH, url, Some(assignee_id), user_id, "assign task")
            .await
    }
}

#[async_trait]
impl CommentService for TodoApiClient {
    async fn get_by_task(&self, task_id: i64, user_id: &str) -> TodoResult<Vec<CommentDto>> {
        let url = self.url(&format!("/api/comments/task/{task_id}"), &[])?;
        self.get_json(url, user_id, "list comments").await
    }

    async fn add(&self, task_id: i64, content: &str, user_id: &str) -> TodoResult<CommentDto> {
        let url = self.url(&format!("/api/comments/task/{task_id}"), &[])?;
        self.send_json(Method::POST, url, content, user_id, "add comment")
            .await
    }

    async fn update(&self, comment_id: i64, content: &str, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/comments/{comment_id}"), &[])?;
        self.send_no_content(Method::PUT, url, Some(content), user_id, "update comment")
            .await
    }

    async fn delete(&self, comment_id: i64, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/comments/{comment_id}"), &[])?;
        self.send_no_content(Method::DELETE, url, NO_BODY, user_id, "delete comment")
            .await
    }
}

#[async_trait]
impl TagService for TodoApiClient {
    async fn get_all(&self, user_id: &str) -> TodoResult<Vec<TagDto>> {
        let url = self.url("/api/tags", &[])?;
        self.get_json(url, user_id, "list tags").await
    }

    async fn get_by_task(&self, task_id: i64, user_id: &str) -> TodoResult<Vec<TagDto>> {
        let url = self.url(&format!("/api/tags/task/{task_id}"), &[])?;
        self.get_json(url, user_id, "list task tags").await
    }

    async fn get_tasks_by_tag(&self, tag_id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>> {
        let url = self.url(&format!("/api/tags/{tag_id}/tasks"), &[])?;
        self.get_json(url, user_id, "list tasks by tag").await
    }

    async fn add_to_task(&self, task_id: i64, name: &str, user_id: &str) -> TodoResult<TagDto> {
        let url = self.url(&format!("/api/tags/task/{task_id}"), &[])?;
        self.send_json(Method::POST, url, name, user_id, "add tag").await
    }

    async fn remove_from_task(&self, task_id: i64, tag_id: i64, user_id: &str) -> TodoResult<()> {
        let url = self.url(&format!("/api/tags/task/{task_id}/{tag_id}"), &[])?;
        self.send_no_content(Method::DELETE, url, NO_BODY, user_id, "remove tag")
            .await
    }
}

#[async_trait]
impl SearchService for TodoApiClient {
    async fn search(
        &self,
        user_id: &str,
        query: &TaskSearchQuery,
    ) -> TodoResult<PagedResult<TaskDto>> {
        let mut params = page_params(&query.page);
        if let Some(text) = query.normalized_text() {
            params.push(("q", text.to_string()));
        }
        if let Some(start) = query.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = query.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        let url = self.url("/api/search/tasks", &params)?;
        self.get_json(url, user_id, "search tasks").await
    }
}
