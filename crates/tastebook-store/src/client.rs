//! Lazily connected, process-wide store handle.
//!
//! `StoreClient` opens the configured engine on the first call to `handle()` and hands
//! the same `Arc` to every later caller. Concurrent first calls wait on a single
//! initialization. A failed initialization is not cached, so the next call retries.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::error::{Result, StoreError};
use crate::memory::MemoryStore;
use crate::KvStore;

/// Default bound on opening the store.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which engine backs the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process memory.
    Memory,
    /// External Redis server (requires the `redis-backend` feature).
    Redis {
        /// Connection URL, e.g. `redis://localhost:6379`.
        url: String,
    },
    /// Embedded `RocksDB` at `path` (requires the `rocksdb-backend` feature).
    RocksDb {
        /// Data directory.
        path: PathBuf,
    },
}

/// Store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Engine selection.
    pub backend: StoreBackend,
    /// How long opening the engine may take before it is reported unreachable.
    pub connect_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Shared accessor for the process's store handle.
pub struct StoreClient {
    config: StoreConfig,
    handle: OnceCell<Arc<dyn KvStore>>,
}

impl StoreClient {
    /// Create an accessor that connects on first use.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            handle: OnceCell::new(),
        }
    }

    /// Create an accessor around an already open store.
    #[must_use]
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self {
            config: StoreConfig::default(),
            handle: OnceCell::new_with(Some(store)),
        }
    }

    /// The connection settings.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether a handle has been established.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    /// Return the shared store handle, connecting first if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the store cannot be opened within the
    /// configured timeout.
    pub async fn handle(&self) -> Result<Arc<dyn KvStore>> {
        self.handle
            .get_or_try_init(|| self.connect())
            .await
            .map(Arc::clone)
    }

    async fn connect(&self) -> Result<Arc<dyn KvStore>> {
        tracing::info!(backend = ?self.config.backend, "Connecting to store");

        let store = tokio::time::timeout(self.config.connect_timeout, open(&self.config.backend))
            .await
            .map_err(|_| {
                StoreError::Connectivity(format!(
                    "timed out after {:?} opening {:?}",
                    self.config.connect_timeout, self.config.backend
                ))
            })
            .and_then(|opened| opened)
            .map_err(|e| {
                tracing::error!(error = %e, "Store connection failed");
                e
            })?;

        tracing::info!("Store connected");
        Ok(store)
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}

async fn open(backend: &StoreBackend) -> Result<Arc<dyn KvStore>> {
    match backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Redis { url } => open_redis(url).await,
        StoreBackend::RocksDb { path } => open_rocks(path.clone()).await,
    }
}

#[cfg(feature = "redis-backend")]
async fn open_redis(url: &str) -> Result<Arc<dyn KvStore>> {
    Ok(Arc::new(crate::redis_store::RedisStore::connect(url).await?))
}

#[cfg(not(feature = "redis-backend"))]
async fn open_redis(url: &str) -> Result<Arc<dyn KvStore>> {
    Err(StoreError::Connectivity(format!(
        "cannot connect to {url}: built without the redis-backend feature"
    )))
}

#[cfg(feature = "rocksdb-backend")]
async fn open_rocks(path: PathBuf) -> Result<Arc<dyn KvStore>> {
    let store = tokio::task::spawn_blocking(move || crate::rocks::RocksStore::open(path))
        .await
        .map_err(|e| StoreError::Connectivity(e.to_string()))?
        .map_err(|e| StoreError::Connectivity(e.to_string()))?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb-backend"))]
async fn open_rocks(path: PathBuf) -> Result<Arc<dyn KvStore>> {
    Err(StoreError::Connectivity(format!(
        "cannot open {}: built without the rocksdb-backend feature",
        path.display()
    )))
}
