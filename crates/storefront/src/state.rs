//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::cosmic::CosmicClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; owns the configuration and the CMS
/// client for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cosmic: CosmicClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let cosmic = CosmicClient::new(&config.cosmic);

        Self {
            inner: Arc::new(AppStateInner { config, cosmic }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the CMS client.
    #[must_use]
    pub fn cosmic(&self) -> &CosmicClient {
        &self.inner.cosmic
    }
}
