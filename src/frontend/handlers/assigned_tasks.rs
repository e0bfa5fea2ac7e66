//! Tasks assigned to the visitor, with status filter, sort and paging.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tera::Context;

use super::{fail, page_or_first, PageForm};
use crate::constants::TASK_QUERY_DEFAULT_PAGE_SIZE;
use crate::frontend::error::{describe, FrontendResult};
use crate::frontend::session::{Flash, Visitor};
use crate::frontend::state::FrontendState;
use crate::frontend::views::{status_options, PagerView, TaskView};
use crate::models::TaskStatus;
use crate::types::{AssignedTaskSort, AssignedTasksQuery, PageRequest};

const PATH: &str = "/assigned";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPageQuery {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
}

impl AssignedPageQuery {
    /// Unknown status values show the default (not completed) view
    pub fn to_query(&self) -> AssignedTasksQuery {
        AssignedTasksQuery {
            status: self
                .status
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .and_then(|s| s.parse::<TaskStatus>().ok()),
            sort_by: self
                .sort_by
                .as_deref()
                .map(AssignedTaskSort::parse_lenient)
                .unwrap_or_default(),
            page: PageRequest::new(page_or_first(self.page), TASK_QUERY_DEFAULT_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize)]
struct SortOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

fn sort_options(selected: AssignedTaskSort) -> Vec<SortOption> {
    AssignedTaskSort::ALL
        .iter()
        .map(|sort| SortOption {
            value: sort.as_str(),
            label: match sort {
                AssignedTaskSort::Name => "Name",
                AssignedTaskSort::DueDate => "Due date",
                AssignedTaskSort::Priority => "Priority",
                AssignedTaskSort::Status => "Status",
            },
            selected: *sort == selected,
        })
        .collect()
}

pub async fn index(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Query(params): Query<AssignedPageQuery>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    let query = params.to_query();

    let mut context = Context::new();
    context.insert("title", "Assigned to me");
    context.insert("status_options", &status_options(query.status));
    context.insert("sort_options", &sort_options(query.sort_by));

    match state.services.assigned_tasks.get_assigned(&user_id, &query).await {
        Ok(result) => {
            let filters = [
                (
                    "status",
                    query.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
                ),
                ("sortBy", query.sort_by.as_str().to_string()),
            ];
            context.insert("tasks", &TaskView::list(&result.items));
            context.insert("pager", &PagerView::new(&result, PATH, &filters));
            context.insert("error", &None::<String>);
        }
        Err(err) => {
            context.insert("tasks", &Vec::<TaskView>::new());
            context.insert("pager", &None::<PagerView>);
            context.insert("error", &describe(&err, "Task"));
        }
    }
    state.render(visitor, "assigned/index.html", context)
}

pub async fn change_status(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(task_id): Path<i64>,
    PageForm(form): PageForm<StatusForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    match state
        .services
        .assigned_tasks
        .change_status(task_id, form.status, &user_id)
        .await
    {
        Ok(()) => Ok(visitor.redirect_with(PATH, Flash::success("Task status updated successfully"))),
        Err(err) => Ok(fail(visitor, &err, "Task", PATH)),
    }
}
