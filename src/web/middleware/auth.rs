//! # Authentication Middleware
//!
//! Shared-secret bearer authentication for every `/api` route.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::web::error::ApiError;
use crate::web::state::AppState;

/// Reject requests whose bearer token does not match the configured one
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid authorization header format"))?;

    let token = extract_bearer_token(auth_str)?;
    let expected = state.config.bearer_token.as_bytes();
    if !bool::from(token.as_bytes().ct_eq(expected)) {
        warn!(path = %request.uri().path(), "Rejected request with invalid bearer token");
        return Err(ApiError::unauthorized("Invalid bearer token"));
    }

    debug!(path = %request.uri().path(), "Authenticated API request");
    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, ApiError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Authorization header must use Bearer scheme"))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::unauthorized("Empty Bearer token"));
    }

    Ok(token)
}
