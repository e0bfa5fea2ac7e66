//! # Tag Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::types::{TagDto, TaskDto};
use crate::web::error::ApiResult;
use crate::web::extractors::{ApiJson, ApiPath, CallerId};
use crate::web::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    caller: CallerId,
) -> ApiResult<Json<Vec<TagDto>>> {
    Ok(Json(state.services.tags.get_all(caller.as_str()).await?))
}

/// GET /api/tags/task/{task_id}
pub async fn list_task_tags(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<TagDto>>> {
    let tags = state
        .services
        .tags
        .get_by_task(task_id, caller.as_str())
        .await?;
    Ok(Json(tags))
}

/// POST /api/tags/task/{task_id}
pub async fn add_tag(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(name): ApiJson<String>,
) -> ApiResult<Json<TagDto>> {
    let tag = state
        .services
        .tags
        .add_to_task(task_id, &name, caller.as_str())
        .await?;
    Ok(Json(tag))
}

/// DELETE /api/tags/task/{task_id}/{tag_id}
pub async fn remove_tag(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath((task_id, tag_id)): ApiPath<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .services
        .tags
        .remove_from_task(task_id, tag_id, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/tags/{tag_id}/tasks
pub async fn list_tasks_by_tag(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(tag_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<TaskDto>>> {
    let tasks = state
        .services
        .tags
        .get_tasks_by_tag(tag_id, caller.as_str())
        .await?;
    Ok(Json(tasks))
}
