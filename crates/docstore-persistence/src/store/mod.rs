//! # Document Store Module
//!
//! The driver seam. Repositories talk to a [`DocumentStore`]; what sits
//! behind it (an in-process map, Redis) is opaque to them.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{PersistenceError, Result};

pub use memory::MemoryDocumentStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisDocumentStore;

/// Document-store driver operations consumed by the repositories.
///
/// Documents are JSON objects. Missing records are `None`/empty results,
/// never errors.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the document with this id.
    async fn upsert(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<()>;

    /// Get a document by id.
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Get every document in a collection.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>>;

    /// Get every document whose top-level `field` equals `value`.
    async fn find_by_field(&self, collection: &str, field: &str, value: &Value)
    -> Result<Vec<Value>>;

    /// Get every document stored under a partition key.
    async fn find_by_partition_key(&self, collection: &str, partition_key: &str)
    -> Result<Vec<Value>>;

    /// Number of documents in a collection.
    async fn count(&self, collection: &str) -> Result<u64>;

    /// Delete a document; returns whether it existed.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool>;

    /// Delete every document in a collection; returns how many were removed.
    async fn delete_all(&self, collection: &str) -> Result<u64>;
}

/// Shared driver handle
pub type SharedDocumentStore = Arc<dyn DocumentStore>;

/// Which driver to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

impl StoreBackend {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(PersistenceError::Store(format!(
                "unknown store backend '{other}'"
            ))),
        }
    }
}

/// Document store connection configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
    /// Key prefix separating this database from others on the same server.
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: "redis://127.0.0.1:6379".to_string(),
            namespace: "docstore".to_string(),
        }
    }
}

/// Connect the configured driver.
///
/// # Errors
///
/// Returns an error if the driver cannot connect, or if the Redis backend
/// is requested without the `redis` feature.
pub async fn connect(config: &StoreConfig) -> Result<SharedDocumentStore> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        #[cfg(feature = "redis")]
        StoreBackend::Redis => {
            tracing::info!(url = %config.url, namespace = %config.namespace, "Connecting to Redis");
            let store = RedisDocumentStore::new(config).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis"))]
        StoreBackend::Redis => Err(PersistenceError::Store(
            "redis backend requested but the `redis` feature is disabled".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("REDIS".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert!("cosmos".parse::<StoreBackend>().is_err());
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let store = connect(&StoreConfig::default()).await.unwrap();
        assert_eq!(store.count("anything").await.unwrap(), 0);
    }
}
