//! # Web API State

use std::sync::Arc;

use crate::config::ApiServerConfig;
use crate::services::Services;

/// Shared state for every API handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ApiServerConfig>,
    pub services: Services,
}

impl AppState {
    pub fn new(config: ApiServerConfig, services: Services) -> Self {
        Self {
            config: Arc::new(config),
            services,
        }
    }
}
