//! Application state shared across handlers.

use std::sync::Arc;

use fino_integrino_content::ContentClient;

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    client: Arc<dyn ContentClient>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, client: Arc<dyn ContentClient>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, client }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get the content store client.
    #[must_use]
    pub fn content(&self) -> &dyn ContentClient {
        self.inner.client.as_ref()
    }
}
