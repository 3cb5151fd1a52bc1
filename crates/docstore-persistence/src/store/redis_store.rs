//! # Redis Document Store
//!
//! Documents are stored as JSON strings in Redis. Layout, per collection:
//!
//! ```text
//! <ns>:<collection>:doc:<id>          JSON envelope {partitionKey, document}
//! <ns>:<collection>:ids               SET of every id
//! <ns>:<collection>:partition:<key>   SET of ids sharing a partition key
//! ```
//!
//! Field queries scan the id set and filter in process; partition queries
//! go through the partition set.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DocumentStore, StoreConfig};
use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    partition_key: String,
    document: Value,
}

/// Redis-backed document store
#[derive(Clone)]
pub struct RedisDocumentStore {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisDocumentStore {
    /// Connect to the Redis server named in the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails.
    pub async fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self {
            conn,
            namespace: config.namespace.clone(),
        })
    }

    fn doc_key(&self, collection: &str, id: &str) -> String {
        format!("{}:{collection}:doc:{id}", self.namespace)
    }

    fn ids_key(&self, collection: &str) -> String {
        format!("{}:{collection}:ids", self.namespace)
    }

    fn partition_key(&self, collection: &str, partition_key: &str) -> String {
        format!("{}:{collection}:partition:{partition_key}", self.namespace)
    }

    async fn load(&self, collection: &str, id: &str) -> Result<Option<Envelope>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.doc_key(collection, id)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn load_many(&self, collection: &str, ids: &[String]) -> Result<Vec<Envelope>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = ids.iter().map(|id| self.doc_key(collection, id)).collect();
        let mut conn = self.conn.clone();
        let raw: Vec<Option<String>> = conn.mget(keys).await?;

        raw.into_iter()
            .flatten()
            .map(|json| serde_json::from_str(&json).map_err(Into::into))
            .collect()
    }

    async fn ids(&self, collection: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.smembers(self.ids_key(collection)).await?;
        Ok(ids)
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn upsert(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<()> {
        // A changed partition key moves the id between partition sets.
        if let Some(previous) = self.load(collection, id).await? {
            if previous.partition_key != partition_key {
                let mut conn = self.conn.clone();
                let _: i64 = conn
                    .srem(self.partition_key(collection, &previous.partition_key), id)
                    .await?;
            }
        }

        let envelope = Envelope {
            partition_key: partition_key.to_string(),
            document,
        };
        let json = serde_json::to_string(&envelope)?;

        let mut conn = self.conn.clone();
        let _: () = conn.set(self.doc_key(collection, id), json).await?;
        let _: i64 = conn.sadd(self.ids_key(collection), id).await?;
        let _: i64 = conn
            .sadd(self.partition_key(collection, partition_key), id)
            .await?;

        tracing::debug!(collection, id, partition_key, "Document upserted");
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Ok(self.load(collection, id).await?.map(|env| env.document))
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>> {
        let ids = self.ids(collection).await?;
        let envelopes = self.load_many(collection, &ids).await?;
        Ok(envelopes.into_iter().map(|env| env.document).collect())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Value>> {
        let docs = self.find_all(collection).await?;
        Ok(docs
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }

    async fn find_by_partition_key(
        &self,
        collection: &str,
        partition_key: &str,
    ) -> Result<Vec<Value>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn
            .smembers(self.partition_key(collection, partition_key))
            .await?;
        let envelopes = self.load_many(collection, &ids).await?;
        Ok(envelopes.into_iter().map(|env| env.document).collect())
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = conn.scard(self.ids_key(collection)).await?;
        Ok(count)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool> {
        let Some(existing) = self.load(collection, id).await? else {
            return Ok(false);
        };

        let mut conn = self.conn.clone();
        let _: i64 = conn.del(self.doc_key(collection, id)).await?;
        let _: i64 = conn.srem(self.ids_key(collection), id).await?;
        let _: i64 = conn
            .srem(self.partition_key(collection, &existing.partition_key), id)
            .await?;

        Ok(true)
    }

    async fn delete_all(&self, collection: &str) -> Result<u64> {
        let ids = self.ids(collection).await?;
        if ids.is_empty() {
            return Ok(0);
        }
        let envelopes = self.load_many(collection, &ids).await?;

        let mut keys: Vec<String> = ids.iter().map(|id| self.doc_key(collection, id)).collect();
        keys.extend(
            envelopes
                .iter()
                .map(|env| self.partition_key(collection, &env.partition_key)),
        );
        keys.sort();
        keys.dedup();
        keys.push(self.ids_key(collection));

        let mut conn = self.conn.clone();
        let _: i64 = conn.del(keys).await?;

        tracing::debug!(collection, removed = ids.len(), "Collection cleared");
        Ok(ids.len() as u64)
    }
}
