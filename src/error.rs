//! # Domain Errors
//!
//! Error taxonomy shared by the database services, the remote API client and the
//! front-end. Each kind maps to one HTTP status at the API boundary and one
//! user-facing message in the front-end.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Response format error: {0}")]
    ResponseFormat(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    /// Input or permission problems the caller can fix, as opposed to
    /// infrastructure failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Authorization(_)
        )
    }
}

impl From<sqlx::Error> for TodoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("Row not found".to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(err: serde_json::Error) -> Self {
        Self::ResponseFormat(err.to_string())
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ResponseFormat(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Connectivity(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

pub type TodoResult<T> = Result<T, TodoError>;
