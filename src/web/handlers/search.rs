//! # Search Handlers

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::constants::TASK_QUERY_DEFAULT_PAGE_SIZE;
use crate::types::{PageRequest, PagedResult, TaskDto, TaskSearchQuery};
use crate::web::error::ApiResult;
use crate::web::extractors::{ApiQuery, CallerId};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/search/tasks
pub async fn search_tasks(
    State(state): State<AppState>,
    caller: CallerId,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<PagedResult<TaskDto>>> {
    let page = PageRequest::new(
        params.page_number.unwrap_or(1),
        params.page_size.unwrap_or(TASK_QUERY_DEFAULT_PAGE_SIZE),
    );
    page.validate_bounded()?;

    let query = TaskSearchQuery {
        text: params.q,
        start_date: params.start_date,
        end_date: params.end_date,
        page,
    };
    let results = state
        .services
        .search
        .search(caller.as_str(), &query)
        .await?;
    Ok(Json(results))
}
