#![allow(clippy::doc_markdown)] // Allow technical terms like SQLite, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # TodoList
//!
//! Multi-user todo-list manager: users own todo lists, lists hold tasks, and
//! tasks carry comments and tags and can be assigned to other users.
//!
//! ## Architecture
//!
//! ```text
//! todolist-web (pages) --+--> Services (in-process) --> SQLite
//!                        \--> TodoApiClient --HTTP--> todolist-api --> Services --> SQLite
//! ```
//!
//! One set of service traits carries every business rule. The JSON API
//! serves them over HTTP, and the front-end calls them either in-process or
//! through the API client.
//!
//! ## Module Organization
//!
//! - [`models`] - rows and SQL for lists, tasks, comments, tags and users
//! - [`services`] - service traits and their database implementations
//! - [`client`] - the same traits implemented over the HTTP API
//! - [`web`] - axum JSON API
//! - [`frontend`] - axum server-rendered pages
//! - [`types`] - DTOs, paging and query types shared by every layer
//! - [`config`] - explicit application configuration
//! - [`database`] - pool and migrations
//! - [`error`] - the shared error taxonomy
//! - [`logging`] - tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use todolist::config::ConfigLoader;
//! use todolist::database::DatabaseConnection;
//! use todolist::services::Services;
//! use todolist::types::PageRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::load()?;
//! let db = DatabaseConnection::connect(&config.database).await?;
//! let services = Services::database(db.pool().clone());
//!
//! let page = services
//!     .todo_lists
//!     .get_paged("user-a", PageRequest::new(1, 20))
//!     .await?;
//! println!("{} lists", page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod models;
pub mod services;
pub mod types;
pub mod web;

pub use client::TodoApiClient;
pub use config::{AppConfig, ConfigLoader, DataSourceKind};
pub use error::{TodoError, TodoResult};
pub use models::{TaskPriority, TaskStatus};
pub use services::Services;
