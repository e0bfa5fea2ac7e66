//! Comment pages and actions.
//!
//! Assignees who do not own the list cannot open the task details page, so
//! `/task/{id}/comments` gives them a page of their own to read and add
//! comments.

use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tera::Context;

use super::{fail, CsrfOnly, PageForm};
use crate::error::TodoError;
use crate::frontend::error::{safe_return_url, FrontendResult};
use crate::frontend::session::{Flash, Visitor};
use crate::frontend::state::FrontendState;
use crate::frontend::views::CommentView;

const SUBJECT: &str = "Task";

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    #[serde(default)]
    pub content: String,
    /// Page to go back to after posting
    pub return_to: Option<String>,
}

fn back_to(return_to: Option<&str>, task_id: i64) -> String {
    match return_to {
        Some(url) if !url.is_empty() => safe_return_url(Some(url)).to_string(),
        _ => format!("/task/{task_id}"),
    }
}

pub async fn index(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(task_id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();

    let comments = match state.services.comments.get_by_task(task_id, &user_id).await {
        Ok(comments) => comments,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, "/assigned")),
    };
    // owners can also open the full task page and manage comments
    let owned_task = state.services.tasks.get_by_id(task_id, &user_id).await.ok();

    let mut context = Context::new();
    context.insert("title", "Comments");
    context.insert("task_id", &task_id);
    context.insert(
        "task_title",
        &owned_task.as_ref().map(|task| task.title.as_str()),
    );
    context.insert("is_owner", &owned_task.is_some());
    context.insert(
        "comments",
        &comments
            .iter()
            .map(|comment| CommentView::new(comment, &user_id))
            .collect::<Vec<_>>(),
    );
    state.render(visitor, "task/comments.html", context)
}

pub async fn add(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(task_id): Path<i64>,
    PageForm(form): PageForm<CommentForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let back = back_to(form.return_to.as_deref(), task_id);
    match state
        .services
        .comments
        .add(task_id, &form.content, &user_id)
        .await
    {
        Ok(_) => Ok(visitor.redirect_with(&back, Flash::success("Comment added."))),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, &back)),
    }
}

pub async fn edit_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path((task_id, comment_id)): Path<(i64, i64)>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    let back = format!("/task/{task_id}");

    let comment = match state.services.comments.get_by_task(task_id, &user_id).await {
        Ok(comments) => comments.into_iter().find(|comment| comment.id == comment_id),
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, &back)),
    };
    let Some(comment) = comment else {
        let err = TodoError::not_found(format!("Comment with ID {comment_id} not found"));
        return Ok(fail(visitor, &err, "Comment", &back));
    };

    let mut context = Context::new();
    context.insert("title", "Edit comment");
    context.insert("comment", &CommentView::new(&comment, &user_id));
    state.render(visitor, "task/comment_edit.html", context)
}

pub async fn edit(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path((task_id, comment_id)): Path<(i64, i64)>,
    PageForm(form): PageForm<CommentForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let back = format!("/task/{task_id}");
    match state
        .services
        .comments
        .update(comment_id, &form.content, &user_id)
        .await
    {
        Ok(()) => Ok(visitor.redirect_with(&back, Flash::success("Comment updated."))),
        Err(err) => Ok(fail(visitor, &err, "Comment", &back)),
    }
}

pub async fn delete(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path((task_id, comment_id)): Path<(i64, i64)>,
    PageForm(form): PageForm<CsrfOnly>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let back = format!("/task/{task_id}");
    match state.services.comments.delete(comment_id, &user_id).await {
        Ok(()) => Ok(visitor.redirect_with(&back, Flash::success("Comment deleted."))),
        Err(err) => Ok(fail(visitor, &err, "Comment", &back)),
    }
}
