//! # Database Operations
//!
//! SQLite pool creation, health checks and the embedded migration set.
//!
//! - [`connection`] - pool construction from [`DatabaseConfig`](crate::config::DatabaseConfig)
//! - [`migrations`] - schema migrations compiled into the binary

pub mod connection;
pub mod migrations;

pub use connection::DatabaseConnection;
pub use migrations::{run_migrations, MIGRATOR};
