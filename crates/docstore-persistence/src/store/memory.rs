//! In-process document store.
//!
//! Keeps each collection in a `BTreeMap` keyed by id behind a tokio
//! `RwLock`. Used for local runs and tests; counts every driver call so
//! callers can check that nothing ran before a deferred handle was polled.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::Result;

#[derive(Debug, Clone)]
struct StoredDocument {
    partition_key: String,
    body: Value,
}

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, StoredDocument>>>,
    operations: AtomicU64,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of driver calls executed so far.
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::SeqCst)
    }

    fn record(&self, op: &'static str, collection: &str) {
        self.operations.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(op, collection, "memory store call");
    }

    async fn select(
        &self,
        collection: &str,
        keep: impl Fn(&StoredDocument) -> bool,
    ) -> Vec<Value> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| keep(doc))
                    .map(|doc| doc.body.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn upsert(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<()> {
        self.record("upsert", collection);
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().insert(
            id.to_string(),
            StoredDocument {
                partition_key: partition_key.to_string(),
                body: document,
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.record("find_by_id", collection);
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|doc| doc.body.clone()))
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>> {
        self.record("find_all", collection);
        Ok(self.select(collection, |_| true).await)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Value>> {
        self.record("find_by_field", collection);
        Ok(self
            .select(collection, |doc| doc.body.get(field) == Some(value))
            .await)
    }

    async fn find_by_partition_key(
        &self,
        collection: &str,
        partition_key: &str,
    ) -> Result<Vec<Value>> {
        self.record("find_by_partition_key", collection);
        Ok(self
            .select(collection, |doc| doc.partition_key == partition_key)
            .await)
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        self.record("count", collection);
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map_or(0, |docs| docs.len() as u64))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool> {
        self.record("delete_by_id", collection);
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }

    async fn delete_all(&self, collection: &str) -> Result<u64> {
        self.record("delete_all", collection);
        let mut collections = self.collections.write().await;
        Ok(collections
            .remove(collection)
            .map_or(0, |docs| docs.len() as u64))
    }
}
