//! Task search page.

use axum::extract::{Query, State};
use axum::response::Response;
use chrono::NaiveDate;
use serde::Deserialize;
use tera::Context;

use super::page_or_first;
use crate::constants::TASK_QUERY_DEFAULT_PAGE_SIZE;
use crate::error::TodoError;
use crate::frontend::error::{describe, FrontendResult};
use crate::frontend::session::Visitor;
use crate::frontend::state::FrontendState;
use crate::frontend::views::{PagerView, TaskView};
use crate::types::{PageRequest, TaskSearchQuery};

const PATH: &str = "/search";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageQuery {
    pub q: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, TodoError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| TodoError::validation(format!("{field}: '{text}' is not a valid date"))),
    }
}

impl SearchPageQuery {
    /// Nothing is searched until the form has been submitted
    pub fn is_submitted(&self) -> bool {
        self.q.is_some() || self.start_date.is_some() || self.end_date.is_some()
    }

    pub fn to_query(&self) -> Result<TaskSearchQuery, TodoError> {
        Ok(TaskSearchQuery {
            text: self.q.clone(),
            start_date: parse_date("startDate", self.start_date.as_deref())?,
            end_date: parse_date("endDate", self.end_date.as_deref())?,
            page: PageRequest::new(page_or_first(self.page), TASK_QUERY_DEFAULT_PAGE_SIZE),
        })
    }
}

pub async fn index(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Query(params): Query<SearchPageQuery>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();

    let mut context = Context::new();
    context.insert("title", "Search tasks");
    context.insert("q", &params.q.clone().unwrap_or_default());
    context.insert("start_date", &params.start_date.clone().unwrap_or_default());
    context.insert("end_date", &params.end_date.clone().unwrap_or_default());
    context.insert("submitted", &params.is_submitted());
    context.insert("tasks", &Vec::<TaskView>::new());
    context.insert("pager", &None::<PagerView>);
    context.insert("error", &None::<String>);

    if params.is_submitted() {
        let outcome = match params.to_query() {
            Ok(query) => state.services.search.search(&user_id, &query).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(result) => {
                let filters = [
                    ("q", params.q.clone().unwrap_or_default()),
                    ("startDate", params.start_date.clone().unwrap_or_default()),
                    ("endDate", params.end_date.clone().unwrap_or_default()),
                ];
                context.insert("tasks", &TaskView::list(&result.items));
                context.insert("pager", &PagerView::new(&result, PATH, &filters));
            }
            Err(err) => context.insert("error", &describe(&err, "Task")),
        }
    }

    state.render(visitor, "search/index.html", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubmitted_form() {
        assert!(!SearchPageQuery::default().is_submitted());
    }

    #[test]
    fn test_dates_parse_or_fail() {
        let params = SearchPageQuery {
            q: Some("milk".into()),
            start_date: Some("2025-01-01".into()),
            end_date: Some(String::new()),
            page: None,
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(query.end_date, None);
        assert_eq!(query.page.page_number, 1);

        let bad = SearchPageQuery {
            start_date: Some("January".into()),
            ..Default::default()
        };
        assert!(matches!(bad.to_query(), Err(TodoError::Validation(_))));
    }
}
