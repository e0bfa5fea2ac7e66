//! # Assigned Task Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::constants::TASK_QUERY_DEFAULT_PAGE_SIZE;
use crate::models::TaskStatus;
use crate::types::{AssignedTaskSort, AssignedTasksQuery, PageRequest, PagedResult, TaskDto};
use crate::web::error::{ApiError, ApiResult};
use crate::web::extractors::{ApiJson, ApiPath, ApiQuery, CallerId};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedQueryParams {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl AssignedQueryParams {
    fn into_query(self) -> ApiResult<AssignedTasksQuery> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<TaskStatus>()?),
        };
        let page = PageRequest::new(
            self.page_number.unwrap_or(1),
            self.page_size.unwrap_or(TASK_QUERY_DEFAULT_PAGE_SIZE),
        );
        page.validate_bounded()?;

        Ok(AssignedTasksQuery {
            status,
            sort_by: self
                .sort_by
                .as_deref()
                .map(AssignedTaskSort::parse_lenient)
                .unwrap_or_default(),
            page,
        })
    }
}

/// GET /api/assignedtasks
pub async fn list_assigned_tasks(
    State(state): State<AppState>,
    caller: CallerId,
    ApiQuery(params): ApiQuery<AssignedQueryParams>,
) -> ApiResult<Json<PagedResult<TaskDto>>> {
    let query = params.into_query()?;
    let tasks = state
        .services
        .assigned_tasks
        .get_assigned(caller.as_str(), &query)
        .await?;
    Ok(Json(tasks))
}

/// PATCH /api/assignedtasks/{task_id}/status
pub async fn change_status(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(status): ApiJson<TaskStatus>,
) -> ApiResult<StatusCode> {
    state
        .services
        .assigned_tasks
        .change_status(task_id, status, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/assignedtasks/{task_id}/assign
pub async fn assign_task(
    State(state): State<AppState>,
    caller: CallerId,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(assignee_id): ApiJson<String>,
) -> ApiResult<StatusCode> {
    if assignee_id.trim().is_empty() {
        return Err(ApiError::bad_request("Assignee user id must not be empty"));
    }

    state
        .services
        .assigned_tasks
        .assign(task_id, &assignee_id, caller.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
