//! # Remote API Client
//!
//! `TodoApiClient` implements every service trait over HTTP so the web
//! front-end can run against a separate API process.
//!
//! ```rust,no_run
//! use todolist::client::TodoApiClient;
//! use todolist::config::ApiClientConfig;
//! use todolist::services::Services;
//!
//! # fn example() -> todolist::TodoResult<()> {
//! let client = TodoApiClient::new(ApiClientConfig::default())?;
//! let services = Services::remote(client);
//! # let _ = services;
//! # Ok(())
//! # }
//! ```

mod api_client;
mod remote_services;

pub use api_client::TodoApiClient;

use std::sync::Arc;

use crate::services::Services;

impl Services {
    /// Every service backed by one shared HTTP client
    pub fn remote(client: TodoApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            todo_lists: client.clone(),
            tasks: client.clone(),
            assigned_tasks: client.clone(),
            comments: client.clone(),
            tags: client.clone(),
            search: client,
        }
    }
}
