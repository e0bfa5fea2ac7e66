//! Configuration Loader
//!
//! Loading order:
//! 0. `.env` file if present (via dotenvy)
//! 1. TOML file from `TODOLIST_CONFIG_PATH`, or `config/todolist.toml`
//! 2. Environment variable overrides
//! 3. Validation with the validator library
//!
//! A missing default file yields the built-in defaults. A missing file named
//! explicitly through `TODOLIST_CONFIG_PATH` is an error.

use super::error::{ConfigResult, ConfigurationError};
use super::{AppConfig, DataSourceKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

pub const CONFIG_PATH_VAR: &str = "TODOLIST_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/todolist.toml";

/// Zero-state loader; all functions are associated
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Detect environment from TODOLIST_ENV or default to "development"
    pub fn detect_environment() -> String {
        std::env::var("TODOLIST_ENV").unwrap_or_else(|_| "development".to_string())
    }

    /// Load configuration using the process environment
    pub fn load() -> ConfigResult<AppConfig> {
        dotenvy::dotenv().ok();

        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigurationError::ConfigFileNotFound { path });
                }
                Self::load_from_path(&path)
            }
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_from_path(&path)
                } else {
                    debug!(
                        default_path = DEFAULT_CONFIG_PATH,
                        "No configuration file found, using built-in defaults"
                    );
                    Self::finalize(AppConfig::default(), env_lookup)
                }
            }
        }
    }

    /// Load configuration from a specific TOML file, then apply overrides
    pub fn load_from_path(path: &Path) -> ConfigResult<AppConfig> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigurationError::FileReadError {
                file_path: path.display().to_string(),
                error: e.to_string(),
            })?;

        let config = Self::parse_toml(&contents, &path.display().to_string())?;
        let config = Self::finalize(config, env_lookup)?;

        info!(
            path = %path.display(),
            environment = %config.environment,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse TOML without applying environment overrides or validation
    pub fn parse_toml(contents: &str, source: &str) -> ConfigResult<AppConfig> {
        toml::from_str(contents).map_err(|e| ConfigurationError::InvalidToml {
            file_path: source.to_string(),
            error: e.to_string(),
        })
    }

    /// Apply overrides from `lookup` and validate
    pub fn finalize<F>(mut config: AppConfig, lookup: F) -> ConfigResult<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::apply_overrides(&mut config, lookup)?;

        config
            .validate()
            .map_err(|errors| ConfigurationError::validation_error(errors.to_string()))?;

        debug!(
            config = ?config.sanitized(),
            "Configuration validated"
        );
        Ok(config)
    }

    /// Overlay environment values onto `config`
    pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("TODOLIST_ENV") {
            config.environment = env;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        }
        if let Some(bind) = lookup("TODOLIST_API_BIND_ADDRESS") {
            config.api.bind_address = bind;
        }
        if let Some(token) = lookup("TODOLIST_BEARER_TOKEN") {
            config.api.bearer_token = token.clone();
            config.client.bearer_token = token;
        }
        if let Some(base_url) = lookup("TODOLIST_API_BASE_URL") {
            config.client.base_url = base_url;
        }
        if let Some(timeout) = lookup("TODOLIST_API_TIMEOUT_MS") {
            config.client.timeout_ms = timeout.parse().map_err(|e| {
                ConfigurationError::invalid_value(
                    "client.timeout_ms",
                    &timeout,
                    format!("{e}"),
                )
            })?;
        }
        if let Some(bind) = lookup("TODOLIST_WEB_BIND_ADDRESS") {
            config.web.bind_address = bind;
        }
        if let Some(secret) = lookup("TODOLIST_SESSION_SECRET") {
            config.web.session_secret = secret;
        }
        if let Some(source) = lookup("TODOLIST_DATA_SOURCE") {
            config.web.data_source = source.parse::<DataSourceKind>()?;
        }
        Ok(())
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
