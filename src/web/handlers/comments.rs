//! # Comment Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::types::CommentDto;
use crate::web::error::ApiResult;
use crate::web::extractors::{ApiJson, ApiPath, CallerId};
use crate::web::state::AppState;

/// GET /api/comments/task/{task_id}
pub async fn list_comments(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<CommentDto>>> {
    let comments = state
        .services
        .comments
        .get_by_task(task_id, caller.as_str())
        .await?;
    Ok(Json(comments))
}

/// POST /api/comments/task/{task_id}
pub async fn add_comment(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(content): ApiJson<String>,
) -> ApiResult<(StatusCode, Json<CommentDto>)> {
    let comment = state
        .services
        .comments
        .add(task_id, &content, caller.as_str())
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /api/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(comment_id): ApiPath<i64>,
    ApiJson(content): ApiJson<String>,
) -> ApiResult<StatusCode> {
    state
        .services
        .comments
        .update(comment_id, &content, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(comment_id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state
        .services
        .comments
        .delete(comment_id, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
