//! Todo list pages: index, details, create, edit and delete.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use tera::Context;
use tracing::warn;

use super::{fail, optional_text, page_or_first, CsrfOnly, PageForm};
use crate::error::TodoError;
use crate::frontend::error::{describe, FrontendResult};
use crate::frontend::session::{Flash, Visitor};
use crate::frontend::state::FrontendState;
use crate::frontend::views::{PagerView, TaskView, TodoListView};
use crate::types::{CreateTodoListRequest, PageRequest, TodoListDto, UpdateTodoListRequest};

const SUBJECT: &str = "Todo list";
const INDEX: &str = "/todolist";

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TodoListForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

fn form_page(
    state: &FrontendState,
    visitor: Visitor,
    list_id: Option<i64>,
    title: &str,
    description: Option<&str>,
    errors: &[String],
) -> FrontendResult<Response> {
    let mut context = Context::new();
    context.insert(
        "title",
        if list_id.is_some() {
            "Edit todo list"
        } else {
            "Create todo list"
        },
    );
    context.insert("list_id", &list_id);
    context.insert("list_title", title);
    context.insert("list_description", &description);
    context.insert("errors", errors);
    state.render(visitor, "todolist/form.html", context)
}

/// Load a list the visitor owns, or flash "not found" and go back to the index
async fn owned_list(
    state: &FrontendState,
    id: i64,
    user_id: &str,
) -> Result<TodoListDto, TodoError> {
    state
        .services
        .todo_lists
        .get_by_id(id, user_id)
        .await?
        .ok_or_else(|| TodoError::not_found(format!("Todo list with ID {id} not found")))
}

pub async fn index(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Query(query): Query<IndexQuery>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    let page = PageRequest::new(page_or_first(query.page), state.config.lists_page_size);

    let mut context = Context::new();
    context.insert("title", "My todo lists");
    match state.services.todo_lists.get_paged(&user_id, page).await {
        Ok(result) => {
            let lists: Vec<TodoListView> = result.items.iter().map(TodoListView::from).collect();
            context.insert("lists", &lists);
            context.insert("pager", &PagerView::new(&result, INDEX, &[]));
            context.insert("error", &None::<String>);
        }
        Err(TodoError::Authorization(reason)) => {
            warn!(user_id = %user_id, reason = %reason, "Todo list index refused");
            return Ok(visitor.redirect("/account/access-denied"));
        }
        Err(err) => {
            context.insert("lists", &Vec::<TodoListView>::new());
            context.insert("pager", &None::<PagerView>);
            context.insert("error", &describe(&err, SUBJECT));
        }
    }
    state.render(visitor, "todolist/index.html", context)
}

pub async fn details(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();

    let list = match owned_list(&state, id, &user_id).await {
        Ok(list) => list,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    let mut tasks = match state.services.todo_lists.get_tasks(id, &user_id).await {
        Ok(tasks) => tasks,
        Err(err) => return Ok(fail(visitor, &err, SUBJECT, INDEX)),
    };
    tasks.sort_by(|a, b| {
        a.is_completed
            .cmp(&b.is_completed)
            .then(a.created_date.cmp(&b.created_date))
    });

    let mut context = Context::new();
    context.insert("title", &list.title);
    context.insert("list", &TodoListView::from(&list));
    context.insert("tasks", &TaskView::list(&tasks));
    state.render(visitor, "todolist/details.html", context)
}

pub async fn create_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
) -> FrontendResult<Response> {
    visitor.require_user()?;
    form_page(&state, visitor, None, "", None, &[])
}

pub async fn create(
    State(state): State<FrontendState>,
    visitor: Visitor,
    PageForm(form): PageForm<TodoListForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let request = CreateTodoListRequest {
        title: form.title.clone(),
        description: optional_text(form.description.clone()),
    };
    match state.services.todo_lists.create(request, &user_id).await {
        Ok(list) => Ok(visitor.redirect_with(
            &format!("/todolist/{}", list.id),
            Flash::success("Todo list created successfully."),
        )),
        Err(TodoError::Validation(message)) => form_page(
            &state,
            visitor,
            None,
            &form.title,
            form.description.as_deref(),
            &[message],
        ),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}

pub async fn edit_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    match owned_list(&state, id, &user_id).await {
        Ok(list) => form_page(
            &state,
            visitor,
            Some(id),
            &list.title,
            list.description.as_deref(),
            &[],
        ),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}

pub async fn edit(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Path(id): Path<i64>,
    PageForm(form): PageForm<TodoListForm>,
) -> FrontendResult<Response> {
    let user_id = visitor.require_user()?.user_id.clone();
    visitor.verify_csrf(&form.csrf)?;

    let request = UpdateTodoListRequest {
        id,
        title: form.title.clone(),
        description: optional_text(form.description.clone()),
    };
    match state.services.todo_lists.update(request, &user_id).await {
        Ok(()) => Ok(visitor.redirect_with(
            &format!("/todolist/{id}"),
            Flash::success("Todo list updated successfully!"),
        )),
        Err(TodoError::Validation(message)) => form_page(
            &state,
            visitor,
            Some(id),
            &form.title,
            form.description.as_deref(),
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
    match owned_list(&state, id, &user_id).await {
        Ok(list) => {
            let mut context = Context::new();
            context.insert("title", "Delete todo list");
            context.insert("list", &TodoListView::from(&list));
            state.render(visitor, "todolist/delete.html", context)
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

    match state.services.todo_lists.delete(id, &user_id).await {
        Ok(()) => Ok(visitor.redirect_with(INDEX, Flash::success("Todo list deleted successfully!"))),
        Err(err) => Ok(fail(visitor, &err, SUBJECT, INDEX)),
    }
}
