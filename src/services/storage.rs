use std::collections::HashMap;

use redis::aio::ConnectionManager;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur with storage operations
///
/// Storage failure is fatal to the invoking catalog operation and must
/// surface to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Opaque key-value storage contract
///
/// A collection is logically a JSON-serializable sequence of records.
/// Reads of an absent collection yield an empty sequence; writes replace
/// the whole collection (callers do read-modify-write).
#[allow(async_fn_in_trait)]
pub trait Storage {
    async fn read_collection(&self, name: &str) -> Result<Vec<Value>, StorageError>;
    async fn write_collection(&self, name: &str, records: Vec<Value>)
        -> Result<(), StorageError>;
}

/// Redis-backed store: one JSON array string per collection key
pub struct RedisStore {
    // ConnectionManager needs interior mutability for command dispatch
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    key_prefix: String,
}

impl RedisStore {
    pub async fn new(redis_url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            key_prefix: "gigmatch".to_string(),
        })
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{}", self.key_prefix, name)
    }
}

impl Storage for RedisStore {
    async fn read_collection(&self, name: &str) -> Result<Vec<Value>, StorageError> {
        let mut conn = self.redis.lock().await;
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.key(name))
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(vec![]),
        }
    }

    async fn write_collection(
        &self,
        name: &str,
        records: Vec<Value>,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(&records)?;

        let mut conn = self.redis.lock().await;
        redis::cmd("SET")
            .arg(self.key(name))
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Wrote collection {} ({} records)", name, records.len());
        Ok(())
    }
}

/// In-memory store for tests and single-process deployments
#[derive(Default)]
pub struct MemoryStore {
    collections: tokio::sync::RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    async fn read_collection(&self, name: &str) -> Result<Vec<Value>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections.get(name).cloned().unwrap_or_default())
    }

    async fn write_collection(
        &self,
        name: &str,
        records: Vec<Value>,
    ) -> Result<(), StorageError> {
        let mut collections = self.collections.write().await;
        collections.insert(name.to_string(), records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_absent_collection_is_empty() {
        let store = MemoryStore::new();
        let records = store.read_collection("jobs").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_write_replaces() {
        let store = MemoryStore::new();

        store
            .write_collection("jobs", vec![serde_json::json!({"id": "1"})])
            .await
            .unwrap();
        store
            .write_collection("jobs", vec![serde_json::json!({"id": "2"})])
            .await
            .unwrap();

        let records = store.read_collection("jobs").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "2");
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_store_round_trip() {
        let store = RedisStore::new("redis://127.0.0.1:6379")
            .await
            .expect("Failed to connect to Redis");

        store
            .write_collection("test_jobs", vec![serde_json::json!({"id": "1"})])
            .await
            .unwrap();
        let records = store.read_collection("test_jobs").await.unwrap();
        assert_eq!(records.len(), 1);
    }
}
