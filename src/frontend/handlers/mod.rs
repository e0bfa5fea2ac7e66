//! Page handlers, one module per area of the site.

pub mod account;
pub mod assigned_tasks;
pub mod comments;
pub mod search;
pub mod tags;
pub mod tasks;
pub mod todo_lists;

use axum::extract::FromRequest;
use axum::response::Response;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::TodoError;
use crate::frontend::error::{describe, FrontendError};
use crate::frontend::session::{Flash, Visitor};

/// `axum::Form` with rejections rendered as a front-end error page
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(FrontendError))]
pub struct PageForm<T>(pub T);

/// Body of forms whose only field is the anti-forgery token
#[derive(Debug, Deserialize)]
pub struct CsrfOnly {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
}

/// Flash the failure and send the visitor to `to`
pub(crate) fn fail(visitor: Visitor, err: &TodoError, subject: &str, to: &str) -> Response {
    if err.is_client_error() {
        info!(path = %visitor.path, error = %err, "Page action rejected");
    } else {
        error!(path = %visitor.path, error = %err, "Page action failed");
    }
    visitor.redirect_with(to, Flash::error(describe(err, subject)))
}

/// Page numbers below 1 fall back to the first page
pub(crate) fn page_or_first(page: Option<u32>) -> u32 {
    page.filter(|page| *page >= 1).unwrap_or(1)
}

/// Blank form input becomes `None`
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
