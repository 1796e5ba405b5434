//! In-process storage engine.
//!
//! Holds every entry in a map behind an async `RwLock`. Each primitive takes the lock
//! once, so single operations are atomic with respect to each other.

use std::collections::HashMap;

use async_trait::async_trait;
use tastebook_core::FieldMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::value::{self, Value};
use crate::KvStore;

/// Memory-backed key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Run `op` against the slot for `key`, writing back whatever it leaves there.
    async fn update<T>(
        &self,
        key: &str,
        op: impl FnOnce(&mut Option<Value>) -> Result<T>,
    ) -> Result<T> {
        let mut entries = self.entries.write().await;
        let mut slot = entries.remove(key);
        let result = op(&mut slot);
        if let Some(value) = slot {
            entries.insert(key.to_string(), value);
        }
        result
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn hset(&self, key: &str, fields: &FieldMap) -> Result<usize> {
        self.update(key, |slot| value::hset(slot, key, fields)).await
    }

    async fn hgetall(&self, key: &str) -> Result<FieldMap> {
        value::hgetall(self.entries.read().await.get(key), key)
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        self.update(key, |slot| value::hincrby(slot, key, field, delta))
            .await
    }

    async fn lpush(&self, key: &str, item: &str) -> Result<usize> {
        self.update(key, |slot| value::lpush(slot, key, item)).await
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        value::lrange(self.entries.read().await.get(key), key, start, stop)
    }

    async fn lrem(&self, key: &str, count: i64, item: &str) -> Result<usize> {
        self.update(key, |slot| value::lrem(slot, key, count, item))
            .await
    }

    async fn del(&self, key: &str) -> Result<usize> {
        Ok(usize::from(self.entries.write().await.remove(key).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::StoreError;

    #[tokio::test]
    async fn hash_crud() {
        let store = MemoryStore::new();
        let fields = FieldMap::from([("name".into(), "Pizza Place".into())]);

        assert!(!store.exists("h").await.unwrap());
        assert_eq!(store.hset("h", &fields).await.unwrap(), 1);
        assert!(store.exists("h").await.unwrap());
        assert_eq!(store.hgetall("h").await.unwrap(), fields);

        assert_eq!(store.del("h").await.unwrap(), 1);
        assert_eq!(store.del("h").await.unwrap(), 0);
        assert!(store.hgetall("h").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_op_keeps_existing_value() {
        let store = MemoryStore::new();
        store.lpush("l", "a").await.unwrap();

        let err = store.hincrby("l", "n", 1).await.unwrap_err();
        assert!(matches!(err, StoreError::WrongType { .. }));
        assert_eq!(store.lrange("l", 0, -1).await.unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn emptied_list_is_removed() {
        let store = MemoryStore::new();
        store.lpush("l", "a").await.unwrap();
        assert_eq!(store.lrem("l", 0, "a").await.unwrap(), 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryStore::new());

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.hincrby("h", "viewCount", 1).await })
            })
            .collect();
        for task in futures::future::join_all(tasks).await {
            task.unwrap().unwrap();
        }

        assert_eq!(store.hgetall("h").await.unwrap()["viewCount"], "50");
    }
}
