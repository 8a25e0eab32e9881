//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::providers::OpenAiClient;

/// State shared across all HTTP handlers.
///
/// Everything here is immutable after startup; concurrent requests share the
/// provider client's connection pool and nothing else.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Client for the three upstream AI provider endpoints.
    pub provider: Arc<OpenAiClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let provider = OpenAiClient::new(&config);
        Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
        }
    }
}
