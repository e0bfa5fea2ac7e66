//! # Web API Handlers
//!
//! One module per resource. Handlers resolve the caller, delegate to the
//! service traits in [`AppState`](crate::web::state::AppState) and map
//! domain errors through [`ApiError`](crate::web::error::ApiError).

pub mod assigned_tasks;
pub mod comments;
pub mod health;
pub mod search;
pub mod tags;
pub mod tasks;
pub mod todo_lists;
