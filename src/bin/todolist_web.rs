//! # TodoList Web Front-end
//!
//! Serves the server-rendered pages. Accounts always use the local
//! database; everything else follows `web.data_source`.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use todolist::client::TodoApiClient;
use todolist::config::{ConfigLoader, DataSourceKind};
use todolist::database::DatabaseConnection;
use todolist::frontend::{create_frontend_app, FrontendState};
use todolist::logging::init_tracing;
use todolist::services::{AccountService, Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ConfigLoader::load().context("failed to load configuration")?;
    info!(
        environment = %config.environment,
        bind_address = %config.web.bind_address,
        data_source = %config.web.data_source,
        "Starting TodoList front-end"
    );

    let database = DatabaseConnection::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    if !database.health_check().await.context("database health check failed")? {
        anyhow::bail!("database health check returned an unexpected result");
    }

    let services = match config.web.data_source {
        DataSourceKind::Database => Services::database(database.pool().clone()),
        DataSourceKind::Remote => {
            let client = TodoApiClient::new(config.client.clone())
                .context("failed to create the API client")?;
            info!(base_url = %client.base_url(), "Using remote API");
            Services::remote(client)
        }
    };
    let accounts = AccountService::new(database.pool().clone());

    let state = FrontendState::new(config.web.clone(), services, accounts)
        .context("failed to initialize the front-end")?;
    let app = create_frontend_app(state);

    let listener = TcpListener::bind(&config.web.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.web.bind_address))?;
    info!(address = %config.web.bind_address, "Front-end listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("front-end server failed")?;

    database.close().await;
    info!("Front-end stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
