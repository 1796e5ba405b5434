//! Redis storage implementation.
//!
//! `RedisStore` maps each `KvStore` primitive onto the Redis command of the same name,
//! so every service process pointed at one server shares the same data. The
//! connection is a `ConnectionManager`, which reconnects after the link drops.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};

use tastebook_core::FieldMap;

use crate::error::{Result, StoreError};
use crate::KvStore;

/// Redis-backed storage implementation.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis server at `url` (e.g. `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the URL is invalid or the server cannot
    /// be reached.
    pub async fn connect(url: &str) -> Result<Self> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Connectivity(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;

        Ok(Self { conn })
    }

    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

/// Translate a Redis error for an operation on `key` (and `field`, for increments).
fn store_error(err: &RedisError, key: &str, field: Option<&str>) -> StoreError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        return StoreError::Connectivity(err.to_string());
    }

    let message = err.to_string();
    if message.contains("WRONGTYPE") {
        return StoreError::WrongType {
            key: key.to_string(),
        };
    }
    if let Some(field) = field {
        if message.contains("not an integer") {
            return StoreError::NotAnInteger {
                key: key.to_string(),
                field: field.to_string(),
            };
        }
        if message.contains("overflow") {
            return StoreError::Overflow {
                key: key.to_string(),
                field: field.to_string(),
            };
        }
    }
    StoreError::Database(message)
}

#[async_trait]
impl KvStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn();
        conn.exists(key)
            .await
            .map_err(|e| store_error(&e, key, None))
    }

    async fn del(&self, key: &str) -> Result<usize> {
        let mut conn = self.conn();
        conn.del(key).await.map_err(|e| store_error(&e, key, None))
    }

    async fn hset(&self, key: &str, fields: &FieldMap) -> Result<usize> {
        // HSET needs at least one pair.
        if fields.is_empty() {
            return Ok(0);
        }

        let mut cmd = redis::cmd("HSET");
        cmd.arg(key);
        for (field, value) in fields {
            cmd.arg(field).arg(value);
        }

        let mut conn = self.conn();
        let added: usize = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| store_error(&e, key, None))?;
        Ok(added)
    }

    async fn hgetall(&self, key: &str) -> Result<FieldMap> {
        let mut conn = self.conn();
        conn.hgetall(key)
            .await
            .map_err(|e| store_error(&e, key, None))
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut conn = self.conn();
        conn.hincr(key, field, delta)
            .await
            .map_err(|e| store_error(&e, key, Some(field)))
    }

    async fn lpush(&self, key: &str, value: &str) -> Result<usize> {
        let mut conn = self.conn();
        conn.lpush(key, value)
            .await
            .map_err(|e| store_error(&e, key, None))
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let mut conn = self.conn();
        let items: Vec<String> = redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .query_async(&mut conn)
            .await
            .map_err(|e| store_error(&e, key, None))?;
        Ok(items)
    }

    async fn lrem(&self, key: &str, count: i64, value: &str) -> Result<usize> {
        let mut conn = self.conn();
        let removed: usize = redis::cmd("LREM")
            .arg(key)
            .arg(count)
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(|e| store_error(&e, key, None))?;
        Ok(removed)
    }
}
