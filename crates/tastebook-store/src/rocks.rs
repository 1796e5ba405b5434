//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `KvStore` trait. Each key
//! maps to one CBOR-encoded `Value`. Read-modify-write primitives are serialized through
//! a writer lock so increments and list edits stay atomic. All database work runs on
//! the blocking thread pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};

use tastebook_core::FieldMap;

use crate::error::{Result, StoreError};
use crate::schema::{all_column_families, cf};
use crate::value::{self, Value};
use crate::KvStore;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    engine: Arc<Engine>,
}

/// The synchronous database and its writer lock.
struct Engine {
    db: DBWithThreadMode<MultiThreaded>,
    writer: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// This blocks; call it from a blocking context.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            engine: Arc::new(Engine {
                db,
                writer: Mutex::new(()),
            }),
        })
    }

    /// Run `op` against the engine on the blocking thread pool.
    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Engine) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || op(&engine))
            .await
            .map_err(|e| StoreError::Database(format!("store task failed: {e}")))?
    }
}

impl Engine {
    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize(value: &Value) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize(data: &[u8]) -> Result<Value> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn read(&self, key: &str) -> Result<Option<Value>> {
        let cf = self.cf(cf::ENTRIES)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Run `op` against the stored slot for `key` and persist what it leaves behind.
    fn update<T>(&self, key: &str, op: impl FnOnce(&mut Option<Value>) -> Result<T>) -> Result<T> {
        let _guard = self
            .writer
            .lock()
            .map_err(|_| StoreError::Database("writer lock poisoned".into()))?;

        let before = self.read(key)?;
        let mut slot = before.clone();
        let result = op(&mut slot)?;

        if slot != before {
            let cf = self.cf(cf::ENTRIES)?;
            match &slot {
                Some(value) => self
                    .db
                    .put_cf(&cf, key, Self::serialize(value)?)
                    .map_err(|e| StoreError::Database(e.to_string()))?,
                None => self
                    .db
                    .delete_cf(&cf, key)
                    .map_err(|e| StoreError::Database(e.to_string()))?,
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl KvStore for RocksStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let key = key.to_owned();
        self.blocking(move |engine| Ok(engine.read(&key)?.is_some()))
            .await
    }

    async fn del(&self, key: &str) -> Result<usize> {
        let key = key.to_owned();
        self.blocking(move |engine| {
            engine.update(&key, |slot| Ok(usize::from(slot.take().is_some())))
        })
        .await
    }

    async fn hset(&self, key: &str, fields: &FieldMap) -> Result<usize> {
        let key = key.to_owned();
        let fields = fields.clone();
        self.blocking(move |engine| engine.update(&key, |slot| value::hset(slot, &key, &fields)))
            .await
    }

    async fn hgetall(&self, key: &str) -> Result<FieldMap> {
        let key = key.to_owned();
        self.blocking(move |engine| value::hgetall(engine.read(&key)?.as_ref(), &key))
            .await
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let key = key.to_owned();
        let field = field.to_owned();
        self.blocking(move |engine| {
            engine.update(&key, |slot| value::hincrby(slot, &key, &field, delta))
        })
        .await
    }

    async fn lpush(&self, key: &str, item: &str) -> Result<usize> {
        let key = key.to_owned();
        let item = item.to_owned();
        self.blocking(move |engine| engine.update(&key, |slot| value::lpush(slot, &key, &item)))
            .await
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let key = key.to_owned();
        self.blocking(move |engine| value::lrange(engine.read(&key)?.as_ref(), &key, start, stop))
            .await
    }

    async fn lrem(&self, key: &str, count: i64, item: &str) -> Result<usize> {
        let key = key.to_owned();
        let item = item.to_owned();
        self.blocking(move |engine| {
            engine.update(&key, |slot| value::lrem(slot, &key, count, &item))
        })
        .await
    }
}
