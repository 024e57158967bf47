//! Application state shared across handlers.

use std::sync::Arc;

use fino_integrino_content::ContentClient;

use crate::config::{ContentSource, StorefrontConfig};
use crate::content::{
    ContentProvider, StaticContentLoader, StaticContentProvider, StoreContentProvider,
};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content source 'store' needs a content client")]
    MissingContentClient,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The content provider is
/// chosen once here and never changes for the life of the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    documents: StaticContentLoader,
    provider: Arc<dyn ContentProvider>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `client` - Content store client, required when the source is `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the store source is selected without a client, or
    /// the HTTP client for remote documents cannot be built.
    pub fn new(
        config: StorefrontConfig,
        client: Option<Arc<dyn ContentClient>>,
    ) -> Result<Self, StateError> {
        let documents = match &config.content_url {
            Some(base) => {
                let http = reqwest::Client::builder()
                    .timeout(std::time::Duration::from_secs(5))
                    .user_agent(concat!("fino-integrino-storefront/", env!("CARGO_PKG_VERSION")))
                    .build()?;
                StaticContentLoader::from_url(http, base.clone())
            }
            None => StaticContentLoader::from_dir(config.content_dir.clone()),
        };

        let provider: Arc<dyn ContentProvider> = match config.content_source {
            ContentSource::Static => Arc::new(StaticContentProvider::new(documents.clone())),
            ContentSource::Store => {
                let client = client.ok_or(StateError::MissingContentClient)?;
                Arc::new(StoreContentProvider::new(client, documents.clone()))
            }
        };

        tracing::info!(
            source = %config.content_source,
            documents = %documents.describe(),
            "Content provider selected"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                documents,
                provider,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The provider that resolves page sections.
    #[must_use]
    pub fn provider(&self) -> &dyn ContentProvider {
        self.inner.provider.as_ref()
    }

    /// Loader for the published section documents.
    #[must_use]
    pub fn documents(&self) -> &StaticContentLoader {
        &self.inner.documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fino_integrino_content::MemoryContentClient;

    #[test]
    fn test_store_source_requires_client() {
        let mut config = StorefrontConfig::local("content");
        config.content_source = ContentSource::Store;

        assert!(matches!(
            AppState::new(config.clone(), None),
            Err(StateError::MissingContentClient)
        ));

        let client: Arc<dyn ContentClient> = Arc::new(MemoryContentClient::new());
        assert!(AppState::new(config, Some(client)).is_ok());
    }

    #[test]
    fn test_static_source_ignores_client() {
        let state = AppState::new(StorefrontConfig::local("content"), None);
        assert!(state.is_ok());
    }
}
