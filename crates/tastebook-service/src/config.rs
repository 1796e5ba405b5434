//! Service configuration.

use std::path::PathBuf;
use std::time::Duration;

use tastebook_store::keys::DEFAULT_NAMESPACE;
use tastebook_store::{StoreBackend, StoreConfig};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Store engine (default: in-memory). `STORE_BACKEND` is `memory`, `redis` (with
    /// `REDIS_URL`) or `rocksdb` (with `DATA_DIR`).
    pub store_backend: StoreBackend,

    /// Seconds allowed for opening the store (default: 5).
    pub store_connect_timeout_seconds: u64,

    /// Prefix of every stored key (default: "tastebook").
    pub key_namespace: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Largest page size served by review listings.
    pub max_page_size: u64,
}

/// Errors in the service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds an unsupported value.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_BACKEND` names an unknown engine.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store_backend = match std::env::var("STORE_BACKEND") {
            Err(_) => defaults.store_backend,
            Ok(value) => parse_backend(&value, redis_url(), data_dir())?,
        };

        Ok(Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            store_backend,
            store_connect_timeout_seconds: env_parse("STORE_CONNECT_TIMEOUT_SECONDS")
                .unwrap_or(defaults.store_connect_timeout_seconds),
            key_namespace: std::env::var("KEY_NAMESPACE").unwrap_or(defaults.key_namespace),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            max_page_size: env_parse("MAX_PAGE_SIZE").unwrap_or(defaults.max_page_size),
        })
    }

    /// Store connection settings derived from this configuration.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store_backend.clone(),
            connect_timeout: Duration::from_secs(self.store_connect_timeout_seconds),
        }
    }
}

fn data_dir() -> PathBuf {
    std::env::var("DATA_DIR")
        .unwrap_or_else(|_| "/data/tastebook".into())
        .into()
}

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into())
}

fn parse_backend(
    value: &str,
    redis_url: String,
    data_dir: PathBuf,
) -> Result<StoreBackend, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "redis" => Ok(StoreBackend::Redis { url: redis_url }),
        "rocksdb" => Ok(StoreBackend::RocksDb { path: data_dir }),
        _ => Err(ConfigError::InvalidValue {
            var: "STORE_BACKEND",
            value: value.to_string(),
        }),
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.parse().ok())
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            store_backend: StoreBackend::Memory,
            store_connect_timeout_seconds: 5,
            key_namespace: DEFAULT_NAMESPACE.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024, // 1MB
            request_timeout_seconds: 30,
            max_page_size: 100,
        }
    }
}
