//! # Web API Middleware
//!
//! Bearer authentication, request ids and the CORS policy shared by the API
//! router.

pub mod auth;
pub mod request_id;

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS for browser clients of the JSON API
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
