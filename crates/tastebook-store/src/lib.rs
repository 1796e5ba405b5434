//! Key-value storage layer for tastebook.
//!
//! The service keeps all of its data in a flat, string-keyed store offering hash-map,
//! ordered-list and atomic-increment primitives. This crate defines that contract
//! (`KvStore`), the key layout (`keys`), and the engines behind it.
//!
//! # Key layout
//!
//! - `{ns}:restaurants:{id}`: restaurant hash
//! - `{ns}:reviews:{restaurant_id}`: review ids, newest first
//! - `{ns}:review_details:{review_id}`: review hash
//!
//! The namespace defaults to `tastebook`. Data written by the earlier `redis-express`
//! deployment uses `redis-express` as its namespace; configure that value to read it.
//!
//! # Engines
//!
//! - `MemoryStore`: in-process, the default
//! - `RedisStore`: an external Redis server shared by every service process, behind
//!   the `redis-backend` feature (enabled by default)
//! - `RocksStore`: embedded `RocksDB`, behind the `rocksdb-backend` feature
//!
//! # Example
//!
//! ```no_run
//! use tastebook_store::{KeySpace, StoreClient, StoreConfig};
//! use tastebook_core::{HashRecord, NewRestaurant, Restaurant};
//!
//! # async fn example() -> tastebook_store::Result<()> {
//! let client = StoreClient::new(StoreConfig::default());
//! let store = client.handle().await?;
//!
//! let keys = KeySpace::default();
//! let restaurant = Restaurant::new(NewRestaurant {
//!     name: "Pizza Place".into(),
//!     location: "NYC".into(),
//! });
//! store.hset(&keys.restaurant(&restaurant.id), &restaurant.to_fields()).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod keys;
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis_store;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;
mod value;

pub use client::{StoreBackend, StoreClient, StoreConfig};
pub use error::{Result, StoreError};
pub use keys::KeySpace;
pub use memory::MemoryStore;
#[cfg(feature = "redis-backend")]
pub use redis_store::RedisStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use async_trait::async_trait;
use tastebook_core::FieldMap;

/// The key-value primitives the service is built on.
///
/// Every method is atomic on its own. Nothing is atomic across calls.
#[async_trait]
pub trait KvStore: Send + Sync {
    // =========================================================================
    // Keys
    // =========================================================================

    /// Check whether any value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Delete `key`. Returns the number of keys removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    async fn del(&self, key: &str) -> Result<usize>;

    // =========================================================================
    // Hashes
    // =========================================================================

    /// Set fields on the hash at `key`, creating it if absent.
    ///
    /// Returns the number of fields that did not exist before.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a list.
    async fn hset(&self, key: &str, fields: &FieldMap) -> Result<usize>;

    /// Read every field of the hash at `key`. An absent key reads as an empty map.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a list.
    async fn hgetall(&self, key: &str) -> Result<FieldMap>;

    /// Atomically add `delta` to an integer hash field and return the new value.
    ///
    /// Missing hashes and fields start from zero.
    ///
    /// # Errors
    ///
    /// - `StoreError::WrongType` if `key` holds a list.
    /// - `StoreError::NotAnInteger` if the field holds something else.
    /// - `StoreError::Overflow` if the result does not fit in an `i64`.
    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64>;

    // =========================================================================
    // Lists
    // =========================================================================

    /// Push `value` at the head of the list at `key`. Returns the new length.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a hash.
    async fn lpush(&self, key: &str, value: &str) -> Result<usize>;

    /// Read the inclusive range `start..=stop` of the list at `key`.
    ///
    /// Negative indices count from the tail; out-of-range requests return what
    /// overlaps, possibly nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a hash.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>>;

    /// Remove occurrences of `value` from the list at `key`.
    ///
    /// `count == 0` removes every occurrence. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a hash.
    async fn lrem(&self, key: &str, count: i64, value: &str) -> Result<usize>;
}
