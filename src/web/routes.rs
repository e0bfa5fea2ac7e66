//! # Web API Route Definitions

use axum::routing::{get, patch, put};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Every `/api` route; authentication is layered on by [`create_app`](super::create_app)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Todo lists
        .route(
            "/todolist",
            get(handlers::todo_lists::list_todo_lists).post(handlers::todo_lists::create_todo_list),
        )
        .route(
            "/todolist/{id}",
            get(handlers::todo_lists::get_todo_list)
                .put(handlers::todo_lists::update_todo_list)
                .delete(handlers::todo_lists::delete_todo_list),
        )
        .route(
            "/todolist/{id}/tasks",
            get(handlers::todo_lists::get_todo_list_tasks),
        )
        // Tasks
        .route(
            "/task/{list_id}/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/task/{task_id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/task/{task_id}/toggle", patch(handlers::tasks::toggle_task))
        // Assigned tasks
        .route(
            "/assignedtasks",
            get(handlers::assigned_tasks::list_assigned_tasks),
        )
        .route(
            "/assignedtasks/{task_id}/status",
            patch(handlers::assigned_tasks::change_status),
        )
        .route(
            "/assignedtasks/{task_id}/assign",
            patch(handlers::assigned_tasks::assign_task),
        )
        // Search
        .route("/search/tasks", get(handlers::search::search_tasks))
        // Tags
        .route("/tags", get(handlers::tags::list_tags))
        .route(
            "/tags/task/{task_id}",
            get(handlers::tags::list_task_tags).post(handlers::tags::add_tag),
        )
        .route(
            "/tags/task/{task_id}/{tag_id}",
            axum::routing::delete(handlers::tags::remove_tag),
        )
        .route("/tags/{tag_id}/tasks", get(handlers::tags::list_tasks_by_tag))
        // Comments
        .route(
            "/comments/task/{task_id}",
            get(handlers::comments::list_comments).post(handlers::comments::add_comment),
        )
        .route(
            "/comments/{comment_id}",
            put(handlers::comments::update_comment).delete(handlers::comments::delete_comment),
        )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::basic_health))
}
