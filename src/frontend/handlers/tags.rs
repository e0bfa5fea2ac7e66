//! Tag index, tasks by tag, and tagging actions on a task.

use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tera::Context;

use super::{fail, CsrfOnly, PageForm};
use crate::frontend::error::{describe, FrontendResult};
use crate::frontend::session::{Flash, Visitor};
use crate::frontend::state::FrontendState;
use crate::frontend::views::{TagView, TaskView};

const INDEX: &str = "/tags";

#[derive(Debug, Deserialize)]
pub struct TagForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    #[serde(default)]
    pub name: String,
}

pub async fn index(
    State(state): State<FrontendState>,
    visitor: Visitor,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();

    let mut context = Context::new();
    context.insert("title", "My tags");
    match state.services.tags.get_all(&user_id).await {
        Ok(tags) => {
            context.insert("tags", &tags.iter().map(TagView::from).collect::<Vec<_>>());
            context.insert("error", &None::<String>);
        }
        Err(err) => {
            context.insert("tags", &Vec::<TagView>::new());
            context.insert("error", &describe(&err, "Tag"));
        }
    }
    state.render(visitor, "tags/index.html", context)
}

pub async fn tasks_by_tag(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(tag_id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();

    let tasks = match state.services.tags.get_tasks_by_tag(tag_id, &user_id).await {
        Ok(tasks) => tasks,
        Err(err) => return Ok(fail(visitor, &err, "Tag", INDEX)),
    };
    let tag_name = match state.services.tags.get_all(&user_id).await {
        Ok(tags) => tags
            .into_iter()
            .find(|tag| tag.id == tag_id)
            .map(|tag| tag.name),
        Err(err) => return Ok(fail(visitor, &err, "Tag", INDEX)),
    };

    let mut context = Context::new();
    context.insert("title", "Tasks by tag");
    context.insert("tag_id", &tag_id);
    context.insert("tag_name", &tag_name);
    context.insert("tasks", &TaskView::list(&tasks));
    state.render(visitor, "tags/tasks.html", context)
}

pub async fn add_to_task(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(task_id): Path<i64>,
    PageForm(form): PageForm<TagForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let back = format!("/task/{task_id}");
    match state
        .services
        .tags
        .add_to_task(task_id, &form.name, &user_id)
        .await
    {
        Ok(tag) => Ok(visitor.redirect_with(
            &back,
            Flash::success(format!("Tag '{}' added.", tag.name)),
        )),
        Err(err) => Ok(fail(visitor, &err, "Task", &back)),
    }
}

pub async fn remove_from_task(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path((task_id, tag_id)): Path<(i64, i64)>,
    PageForm(form): PageForm<CsrfOnly>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let back = format!("/task/{task_id}");
    match state
        .services
        .tags
        .remove_from_task(task_id, tag_id, &user_id)
        .await
    {
        Ok(()) => Ok(visitor.redirect_with(&back, Flash::success("Tag removed."))),
        Err(err) => Ok(fail(visitor, &err, "Task", &back)),
    }
}
