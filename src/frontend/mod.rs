//! # Web Front-end
//!
//! Server-rendered pages over the same service traits the API uses. The
//! services are either in-process against the database or the
//! [`TodoApiClient`](crate::client::TodoApiClient); pages cannot tell which.
//!
//! - [`session`] - signed session, flash and anti-forgery cookies
//! - [`handlers`] - one module per area of the site
//! - [`views`] and [`presentation`] - what templates see
//! - [`templates`] - embedded tera templates

pub mod error;
pub mod handlers;
pub mod presentation;
pub mod session;
pub mod state;
pub mod templates;
pub mod views;

use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;

pub use error::{FrontendError, FrontendResult};
pub use state::FrontendState;

use crate::web::middleware::request_id::add_request_id;

pub fn create_frontend_app(state: FrontendState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/todolist") }))
        // Account
        .route(
            "/account/login",
            get(handlers::account::login_form).post(handlers::account::login),
        )
        .route(
            "/account/register",
            get(handlers::account::register_form).post(handlers::account::register),
        )
        .route("/account/logout", post(handlers::account::logout))
        .route(
            "/account/access-denied",
            get(handlers::account::access_denied),
        )
        // Todo lists
        .route("/todolist", get(handlers::todo_lists::index))
        .route(
            "/todolist/create",
            get(handlers::todo_lists::create_form).post(handlers::todo_lists::create),
        )
        .route("/todolist/{id}", get(handlers::todo_lists::details))
        .route(
            "/todolist/{id}/edit",
            get(handlers::todo_lists::edit_form).post(handlers::todo_lists::edit),
        )
        .route(
            "/todolist/{id}/delete",
            get(handlers::todo_lists::delete_form).post(handlers::todo_lists::delete),
        )
        // Tasks
        .route(
            "/todolist/{id}/task/create",
            get(handlers::tasks::create_form).post(handlers::tasks::create),
        )
        .route("/task/{id}", get(handlers::tasks::details))
        .route(
            "/task/{id}/edit",
            get(handlers::tasks::edit_form).post(handlers::tasks::edit),
        )
        .route(
            "/task/{id}/delete",
            get(handlers::tasks::delete_form).post(handlers::tasks::delete),
        )
        .route("/task/{id}/toggle", post(handlers::tasks::toggle))
        // Assigned tasks
        .route("/assigned", get(handlers::assigned_tasks::index))
        .route(
            "/assigned/{id}/status",
            post(handlers::assigned_tasks::change_status),
        )
        // Search
        .route("/search", get(handlers::search::index))
        // Tags
        .route("/tags", get(handlers::tags::index))
        .route("/tags/{id}", get(handlers::tags::tasks_by_tag))
        .route("/task/{id}/tags", post(handlers::tags::add_to_task))
        .route(
            "/task/{id}/tags/{tag_id}/remove",
            post(handlers::tags::remove_from_task),
        )
        // Comments
        .route(
            "/task/{id}/comments",
            get(handlers::comments::index).post(handlers::comments::add),
        )
        .route(
            "/task/{id}/comments/{comment_id}/edit",
            get(handlers::comments::edit_form).post(handlers::comments::edit),
        )
        .route(
            "/task/{id}/comments/{comment_id}/delete",
            post(handlers::comments::delete),
        )
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
