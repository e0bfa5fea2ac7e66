//! # Front-end Errors
//!
//! Failures that abort a page before it can render. Service failures that
//! a page can recover from are turned into flash messages by the handlers
//! instead; see [`describe`].

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

use crate::error::TodoError;

pub const CONNECTIVITY_MESSAGE: &str = "Unable to connect to the server. Please try again later.";
pub const RESPONSE_FORMAT_MESSAGE: &str =
    "Received invalid response from the server. Please try again.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

const ERROR_PAGE: &str = include_str!("../../templates/error.html");

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("login required")]
    LoginRequired { return_to: String },

    #[error("invalid anti-forgery token")]
    InvalidCsrfToken,

    #[error("invalid form submission: {0}")]
    BadForm(String),

    #[error(transparent)]
    Service(#[from] TodoError),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

pub type FrontendResult<T> = Result<T, FrontendError>;

impl From<FormRejection> for FrontendError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadForm(rejection.body_text())
    }
}

/// User-facing message for a service failure about `subject` ("Task", "Todo list")
pub fn describe(err: &TodoError, subject: &str) -> String {
    match err {
        TodoError::Connectivity(_) => CONNECTIVITY_MESSAGE.to_string(),
        TodoError::ResponseFormat(_) => RESPONSE_FORMAT_MESSAGE.to_string(),
        TodoError::NotFound(_) => format!("{subject} not found."),
        TodoError::Authorization(_) => format!(
            "You don't have permission to access this {}.",
            subject.to_lowercase()
        ),
        TodoError::Validation(message) => message.clone(),
        _ => UNEXPECTED_MESSAGE.to_string(),
    }
}

/// Login URL that brings the visitor back to `return_to` afterwards
pub fn login_url(return_to: &str) -> String {
    match serde_urlencoded::to_string([("returnUrl", return_to)]) {
        Ok(query) => format!("/account/login?{query}"),
        Err(_) => "/account/login".to_string(),
    }
}

/// Only same-site absolute paths are followed after login
pub fn safe_return_url(candidate: Option<&str>) -> &str {
    match candidate {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\") => {
            url
        }
        _ => "/todolist",
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let mut context = tera::Context::new();
    context.insert("status", &status.as_u16());
    context.insert("message", message);
    match tera::Tera::one_off(ERROR_PAGE, &context, true) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render error page");
            (status, message.to_string()).into_response()
        }
    }
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired { return_to } => Redirect::to(&login_url(&return_to)).into_response(),
            Self::InvalidCsrfToken => error_page(
                StatusCode::BAD_REQUEST,
                "The form has expired or was tampered with. Please go back and try again.",
            ),
            Self::BadForm(message) => error_page(StatusCode::BAD_REQUEST, &message),
            Self::Service(err) => {
                let status = match &err {
                    TodoError::Validation(_) => StatusCode::BAD_REQUEST,
                    TodoError::NotFound(_) => StatusCode::NOT_FOUND,
                    TodoError::Authorization(_) => StatusCode::FORBIDDEN,
                    TodoError::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if !err.is_client_error() {
                    error!(error = %err, "Page failed");
                }
                error_page(status, &describe(&err, "Item"))
            }
            Self::Template(err) => {
                error!(error = ?err, "Template rendering failed");
                error_page(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_MESSAGE)
            }
        }
    }
}
