//! # TodoList API Server
//!
//! Serves the JSON API over the in-process database services.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use todolist::config::ConfigLoader;
use todolist::database::DatabaseConnection;
use todolist::logging::init_tracing;
use todolist::services::Services;
use todolist::web::{create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ConfigLoader::load().context("failed to load configuration")?;
    info!(
        environment = %config.environment,
        bind_address = %config.api.bind_address,
        "Starting TodoList API"
    );

    let database = DatabaseConnection::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    if !database.health_check().await.context("database health check failed")? {
        anyhow::bail!("database health check returned an unexpected result");
    }
    let services = Services::database(database.pool().clone());

    let app = create_app(AppState::new(config.api.clone(), services));
    let listener = TcpListener::bind(&config.api.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.api.bind_address))?;
    info!(address = %config.api.bind_address, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    database.close().await;
    info!("API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
