//! Application state.

use std::sync::Arc;

use tastebook_store::{KeySpace, KvStore, StoreClient, StoreError};

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lazily connected store accessor.
    pub store: Arc<StoreClient>,

    /// Key builder for the configured namespace.
    pub keys: KeySpace,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: StoreClient, config: ServiceConfig) -> Self {
        let keys = KeySpace::new(config.key_namespace.clone());
        tracing::info!(namespace = %keys.namespace(), "Key namespace configured");

        Self {
            store: Arc::new(store),
            keys,
            config,
        }
    }

    /// The shared store handle, connecting on first use.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the store cannot be reached.
    pub async fn kv(&self) -> Result<Arc<dyn KvStore>, StoreError> {
        self.store.handle().await
    }
}
