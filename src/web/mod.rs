//! # Web API Module
//!
//! Axum JSON API over the service traits.
//!
//! - [`routes`] - route table for `/api` and `/health`
//! - [`handlers`] - one handler module per resource
//! - [`middleware`] - bearer authentication, request ids, CORS
//! - [`extractors`] - caller identity and error-mapped JSON/query/path extractors
//! - [`error`] - `ApiError` and its JSON body
//! - [`state`] - shared configuration and services

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

pub use error::{ApiError, ApiResult};

/// Create the API application with all routes and middleware
///
/// `/health` is public. Everything under `/api` requires the configured
/// bearer token and a caller identity.
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = std::time::Duration::from_millis(app_state.config.request_timeout_ms);

    let public_routes = routes::health_routes();

    let protected_routes = Router::new().nest("/api", routes::api_routes()).layer(
        axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_bearer_token,
        ),
    );

    let mut app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(tower_http::timeout::TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    if app_state.config.cors_enabled {
        app = app.layer(middleware::create_cors_layer());
    }

    app.layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}
