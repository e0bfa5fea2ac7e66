//! Task pages: details, create, edit, delete and the completion toggle.

use axum::extract::{Path, State};
use axum::response::Response;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tera::Context;

use super::{fail, optional_text, CsrfOnly, PageForm};
use crate::error::TodoError;
use crate::frontend::error::FrontendResult;
use crate::frontend::session::{Flash, Visitor};
use crate::frontend::state::FrontendState;
use crate::frontend::views::{
    priority_options, status_options, CommentView, TagView, TaskView,
};
use crate::models::{TaskPriority, TaskStatus};
use crate::types::{CreateTaskRequest, TaskDto, UpdateTaskRequest};

const SUBJECT: &str = "Task";
const INDEX: &str = "/todolist";

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    pub status: Option<TaskStatus>,
}

/// `YYYY-MM-DD` from a date input, midnight UTC; blank means no due date
pub fn parse_due_date(value: Option<&str>) -> Result<Option<DateTime<Utc>>, TodoError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
            .map(Some)
            .map_err(|_| TodoError::validation(format!("due_date: '{text}' is not a valid date"))),
    }
}

struct FormValues<'a> {
    title: &'a str,
    description: Option<&'a str>,
    due_input: String,
    priority: TaskPriority,
    status: Option<TaskStatus>,
}

fn form_page(
    state: &FrontendState,
    visitor: Visitor,
    todo_list_id: i64,
    task_id: Option<i64>,
    values: FormValues<'_>,
    errors: &[String],
) -> FrontendResult<Response> {
    let mut context = Context::new();
    context.insert(
        "title",
        if task_id.is_some() {
            "Edit task"
        } else {
            "Create task"
        },
    );
    context.insert("todo_list_id", &todo_list_id);
    context.insert("task_id", &task_id);
    context.insert("task_title", values.title);
    context.insert("task_description", &values.description);
    context.insert("due_input", &values.due_input);
    context.insert("priority_options", &priority_options(values.priority));
    context.insert(
        "status_options",
        &task_id.map(|_| status_options(values.status)),
    );
    context.insert("errors", errors);
    state.render(visitor, "task/form.html", context)
}

fn values_from_form(form: &TaskForm) -> FormValues<'_> {
    FormValues {
        title: &form.title,
        description: form.description.as_deref(),
        due_input: form.due_date.clone().unwrap_or_default(),
        priority: form.priority,
        status: form.status,
    }
}

pub async fn details(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    let services = &state.services;

    let task = match services.tasks.get_by_id(id, &user_id).await {
        Ok(task) => task,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    let list_title = match services.todo_lists.get_by_id(task.todo_list_id, &user_id).await {
        Ok(list) => list.map(|list| list.title),
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    let comments = match services.comments.get_by_task(id, &user_id).await {
        Ok(comments) => comments,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    let tags = match services.tags.get_by_task(id, &user_id).await {
        Ok(tags) => tags,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };

    let mut context = Context::new();
    context.insert("title", &task.title);
    context.insert("task", &TaskView::new(&task, Utc::now().date_naive()));
    context.insert("list_title", &list_title);
    context.insert(
        "comments",
        &comments
            .iter()
            .map(|comment| CommentView::new(comment, &user_id))
            .collect::<Vec<_>>(),
    );
    context.insert("tags", &tags.iter().map(TagView::from).collect::<Vec<_>>());
    state.render(visitor, "task/details.html", context)
}

pub async fn create_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(list_id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    match state.services.todo_lists.get_by_id(list_id, &user_id).await {
        Ok(Some(_)) => form_page(
            &state,
            visitor,
            list_id,
            None,
            FormValues {
                title: "",
                description: None,
                due_input: String::new(),
                priority: TaskPriority::default(),
                status: None,
            },
            &[],
        ),
        Ok(None) => Ok(fail(
            visitor,
            &TodoError::not_found(format!("Todo list with ID {list_id} not found")),
            "Todo list",
            INDEX,
        )),
        Err(err) => Ok(fail(visitor, &err, "Todo list", INDEX)),
    }
}

pub async fn create(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(list_id): Path<i64>,
    PageForm(form): PageForm<TaskForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let outcome = match parse_due_date(form.due_date.as_deref()) {
        Ok(due_date) => {
            let request = CreateTaskRequest {
                title: form.title.clone(),
                description: optional_text(form.description.clone()),
                due_date,
                priority: form.priority,
                status: form.status.unwrap_or_default(),
            };
            state.services.tasks.create(list_id, request, &user_id).await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(_) => Ok(visitor.redirect_with(
            &format!("/todolist/{list_id}"),
            Flash::success("Task created successfully."),
        )),
        Err(TodoError::Validation(message)) => form_page(
            &state,
            visitor,
            list_id,
            None,
            values_from_form(&form),
            &[message],
        ),
        Err(err) => Ok(fail(visitor, &err, "Todo list", INDEX)),
    }
}

pub async fn edit_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    let task: TaskDto = match state.services.tasks.get_by_id(id, &user_id).await {
        Ok(task) => task,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    let view = TaskView::new(&task, Utc::now().date_naive());
    form_page(
        &state,
        visitor,
        task.todo_list_id,
        Some(id),
        FormValues {
            title: &task.title,
            description: task.description.as_deref(),
            due_input: view.due_input,
            priority: task.priority,
            status: Some(task.status),
        },
        &[],
    )
}

pub async fn edit(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
    PageForm(form): PageForm<TaskForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let existing = match state.services.tasks.get_by_id(id, &user_id).await {
        Ok(task) => task,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };

    let outcome = match parse_due_date(form.due_date.as_deref()) {
        Ok(due_date) => {
            let request = UpdateTaskRequest {
                id,
                title: form.title.clone(),
                description: optional_text(form.description.clone()),
                priority: form.priority,
                status: form.status.unwrap_or(existing.status),
                due_date,
            };
            state.services.tasks.update(request, &user_id).await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => Ok(visitor.redirect_with(
            &format!("/task/{id}"),
            Flash::success("Task updated successfully."),
        )),
        Err(TodoError::Validation(message)) => form_page(
            &state,
            visitor,
            existing.todo_list_id,
            Some(id),
            values_from_form(&form),
            &[message],
        ),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}

pub async fn delete_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    match state.services.tasks.get_by_id(id, &user_id).await {
        Ok(task) => {
            let mut context = Context::new();
            context.insert("title", "Delete task");
            context.insert("task", &TaskView::new(&task, Utc::now().date_naive()));
            state.render(visitor, "task/delete.html", context)
        }
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}

pub async fn delete(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
    PageForm(form): PageForm<CsrfOnly>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let task = match state.services.tasks.get_by_id(id, &user_id).await {
        Ok(task) => task,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    match state.services.tasks.delete(id, &user_id).await {
        Ok(()) => Ok(visitor.redirect_with(
            &format!("/todolist/{}", task.todo_list_id),
            Flash::success("Task deleted successfully."),
        )),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}

pub async fn toggle(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
    PageForm(form): PageForm<CsrfOnly>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    match state.services.tasks.toggle_completion(id, &user_id).await {
        Ok(task) => Ok(visitor.redirect_with(
            &format!("/todolist/{}", task.todo_list_id),
            Flash::success("Task status updated successfully"),
        )),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}
