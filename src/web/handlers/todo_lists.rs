//! # Todo List Handlers
//!
//! `/api/todolist` endpoints. Reading a list you do not own is a 404, while
//! updating or deleting it is a 403.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::constants::TODO_LIST_DEFAULT_PAGE_SIZE;
use crate::types::{
    CreateTodoListRequest, PageRequest, PagedResult, TaskDto, TodoListDto, UpdateTodoListRequest,
};
use crate::web::error::{ApiError, ApiResult};
use crate::web::extractors::{ApiJson, ApiPath, ApiQuery, CallerId};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/todolist
pub async fn list_todo_lists(
    State(state): State<AppState>,
    caller: CallerId,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Json<PagedResult<TodoListDto>>> {
    let page = PageRequest::new(
        query.page_number.unwrap_or(1),
        query.page_size.unwrap_or(TODO_LIST_DEFAULT_PAGE_SIZE),
    );
    page.validate_bounded()?;

    let lists = state
        .services
        .todo_lists
        .get_paged(caller.as_str(), page)
        .await?;
    Ok(Json(lists))
}

/// GET /api/todolist/{id}
pub async fn get_todo_list(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<TodoListDto>> {
    debug!(todo_list_id = id, user_id = %caller.as_str(), "Fetching todo list");

    state
        .services
        .todo_lists
        .get_by_id(id, caller.as_str())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Todo list with ID {id} not found")))
}

/// GET /api/todolist/{id}/tasks
pub async fn get_todo_list_tasks(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<TaskDto>>> {
    let tasks = state
        .services
        .todo_lists
        .get_tasks(id, caller.as_str())
        .await?;
    Ok(Json(tasks))
}

/// POST /api/todolist
pub async fn create_todo_list(
    State(state): State<AppState>,
    caller: CallerId,
    ApiJson(request): ApiJson<CreateTodoListRequest>,
) -> ApiResult<(StatusCode, Json<TodoListDto>)> {
    let list = state
        .services
        .todo_lists
        .create(request, caller.as_str())
        .await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// PUT /api/todolist/{id}
pub async fn update_todo_list(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTodoListRequest>,
) -> ApiResult<StatusCode> {
    if request.id != id {
        return Err(ApiError::bad_request(format!(
            "Body id {} does not match route id {id}",
            request.id
        )));
    }

    state
        .services
        .todo_lists
        .update(request, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todolist/{id}
pub async fn delete_todo_list(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state
        .services
        .todo_lists
        .delete(id, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
