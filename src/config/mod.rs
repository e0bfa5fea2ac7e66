//! # Application Configuration
//!
//! One explicit [`AppConfig`] is loaded at startup by [`ConfigLoader`] and
//! handed to every component that needs it. Nothing reads configuration from
//! ambient state after that point.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todolist::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::load()?;
//! println!("API listening on {}", config.api.bind_address);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use validator::{Validate, ValidationError};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigLoader;

const REDACTED: &str = "[REDACTED]";

/// Root configuration shared by the API server, the front-end and the tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    /// Deployment environment (test, development, production)
    #[validate(length(min = 1))]
    pub environment: String,

    #[validate(nested)]
    pub database: DatabaseConfig,

    #[validate(nested)]
    pub api: ApiServerConfig,

    #[validate(nested)]
    pub web: WebFrontendConfig,

    #[validate(nested)]
    pub client: ApiClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database: DatabaseConfig::default(),
            api: ApiServerConfig::default(),
            web: WebFrontendConfig::default(),
            client: ApiClientConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Copy of this configuration with secrets replaced, safe for logs and output
    pub fn sanitized(&self) -> Self {
        let mut copy = self.clone();
        copy.api.bearer_token = REDACTED.to_string();
        copy.client.bearer_token = REDACTED.to_string();
        copy.web.session_secret = REDACTED.to_string();
        copy
    }
}

/// Storage connection pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://todolist.db`
    #[validate(custom(function = "validate_sqlite_url"))]
    pub url: String,

    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,

    #[validate(range(min = 1, max = 300))]
    pub acquire_timeout_seconds: u64,

    /// Apply embedded migrations when a pool is created
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://todolist.db".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
            run_migrations: true,
        }
    }
}

/// JSON API server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "snake_case")]
pub struct ApiServerConfig {
    #[validate(custom(function = "validate_bind_address"))]
    pub bind_address: String,

    /// Static bearer token every `/api` request must present
    #[validate(length(min = 8))]
    pub bearer_token: String,

    #[validate(range(min = 100, max = 600000))]
    pub request_timeout_ms: u64,

    pub cors_enabled: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5080".to_string(),
            bearer_token: "development-bearer-token".to_string(),
            request_timeout_ms: 30000,
            cors_enabled: true,
        }
    }
}

/// Which implementation backs the front-end's service traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Call the services in-process against the configured database
    Database,
    /// Call the JSON API through the HTTP client
    #[default]
    Remote,
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => write!(f, "database"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for DataSourceKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            "remote" | "api" => Ok(Self::Remote),
            other => Err(ConfigurationError::invalid_value(
                "web.data_source",
                other,
                "expected 'database' or 'remote'",
            )),
        }
    }
}

/// Server-rendered front-end configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "snake_case")]
pub struct WebFrontendConfig {
    #[validate(custom(function = "validate_bind_address"))]
    pub bind_address: String,

    pub data_source: DataSourceKind,

    /// HMAC key for session, flash and anti-forgery cookies
    #[validate(length(min = 32))]
    pub session_secret: String,

    #[validate(range(min = 1, max = 8760))]
    pub session_ttl_hours: i64,

    /// Mark cookies `Secure` (requires HTTPS in front of the server)
    pub secure_cookies: bool,

    #[validate(range(min = 1, max = 100))]
    pub lists_page_size: u32,
}

impl Default for WebFrontendConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5090".to_string(),
            data_source: DataSourceKind::default(),
            session_secret: "development-session-secret-change-me-0123456789".to_string(),
            session_ttl_hours: 24 * 7,
            secure_cookies: false,
            lists_page_size: 10,
        }
    }
}

/// Outbound HTTP client configuration for the remote data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "snake_case")]
pub struct ApiClientConfig {
    #[validate(url)]
    pub base_url: String,

    #[validate(range(min = 100, max = 600000))]
    pub timeout_ms: u64,

    #[validate(length(min = 8))]
    pub bearer_token: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5080".to_string(),
            timeout_ms: 30000,
            bearer_token: "development-bearer-token".to_string(),
        }
    }
}

fn validate_bind_address(value: &str) -> Result<(), ValidationError> {
    SocketAddr::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("bind_address"))
}

fn validate_sqlite_url(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("sqlite:") {
        Ok(())
    } else {
        Err(ValidationError::new("sqlite_url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok(), "{:?}", config.validate());
        assert_eq!(config.web.data_source, DataSourceKind::Remote);
        assert_eq!(config.web.lists_page_size, 10);
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let mut config = AppConfig::default();
        config.api.bind_address = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_sqlite_url_rejected() {
        let mut config = AppConfig::default();
        config.database.url = "postgresql://localhost/todo".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_session_secret_rejected() {
        let mut config = AppConfig::default();
        config.web.session_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sanitized_hides_secrets() {
        let sanitized = AppConfig::default().sanitized();
        assert_eq!(sanitized.api.bearer_token, REDACTED);
        assert_eq!(sanitized.client.bearer_token, REDACTED);
        assert_eq!(sanitized.web.session_secret, REDACTED);
    }

    #[test]
    fn test_data_source_parsing() {
        assert_eq!(
            "Database".parse::<DataSourceKind>().unwrap(),
            DataSourceKind::Database
        );
        assert_eq!(
            "remote".parse::<DataSourceKind>().unwrap(),
            DataSourceKind::Remote
        );
        assert!("carrier-pigeon".parse::<DataSourceKind>().is_err());
    }
}
