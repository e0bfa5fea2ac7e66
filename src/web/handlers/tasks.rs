//! # Task Handlers
//!
//! `/api/task` endpoints, all restricted to the owner of the parent list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::types::{CreateTaskRequest, TaskDto, UpdateTaskRequest};
use crate::web::error::{ApiError, ApiResult};
use crate::web::extractors::{ApiJson, ApiPath, CallerId};
use crate::web::state::AppState;

/// GET /api/task/{list_id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(list_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<TaskDto>>> {
    let tasks = state
        .services
        .tasks
        .get_by_list(list_id, caller.as_str())
        .await?;
    Ok(Json(tasks))
}

/// POST /api/task/{list_id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(list_id): ApiPath<i64>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskDto>)> {
    debug!(todo_list_id = list_id, title = %request.title, "Creating task via API");

    let task = state
        .services
        .tasks
        .create(list_id, request, caller.as_str())
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/task/{task_id}
pub async fn get_task(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
) -> ApiResult<Json<TaskDto>> {
    let task = state
        .services
        .tasks
        .get_by_id(task_id, caller.as_str())
        .await?;
    Ok(Json(task))
}

/// PUT /api/task/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> ApiResult<StatusCode> {
    if request.id != task_id {
        return Err(ApiError::bad_request(format!(
            "Body id {} does not match route id {task_id}",
            request.id
        )));
    }

    state
        .services
        .tasks
        .update(request, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/task/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state
        .services
        .tasks
        .delete(task_id, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/task/{task_id}/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
) -> ApiResult<Json<TaskDto>> {
    let task = state
        .services
        .tasks
        .toggle_completion(task_id, caller.as_str())
        .await?;
    Ok(Json(task))
}
