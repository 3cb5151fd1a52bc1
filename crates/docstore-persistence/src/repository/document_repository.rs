//! Generic repository over a document-store collection.
//!
//! One implementation serves every entity type: the [`EntityMapping`] says
//! where documents live and which fields carry id and partition key, serde
//! handles the conversion. Derived queries are equality filters on a named
//! document field.

use std::marker::PhantomData;

use docstore_domain::{Customer, User};
use futures::{FutureExt, StreamExt, TryStreamExt, stream};
use serde_json::Value;

use super::traits::{CustomerRepository, ReactiveRepository, UserRepository};
use crate::deferred::{Deferred, DeferredStream};
use crate::error::Result;
use crate::mapping::{EntityMapping, MappedEntity};
use crate::store::SharedDocumentStore;

/// Document-backed repository for entity type `T`.
pub struct DocumentRepository<T> {
    store: SharedDocumentStore,
    mapping: EntityMapping,
    _entity: PhantomData<fn() -> T>,
}

impl<T: MappedEntity> DocumentRepository<T> {
    /// Create a repository with an explicit mapping.
    pub fn new(store: SharedDocumentStore, mapping: EntityMapping) -> Self {
        Self {
            store,
            mapping,
            _entity: PhantomData,
        }
    }

    /// Create a repository using the entity's own mapping.
    pub fn for_entity(store: SharedDocumentStore) -> Self {
        Self::new(store, T::MAPPING)
    }

    pub const fn mapping(&self) -> &EntityMapping {
        &self.mapping
    }

    /// Records whose top-level `field` equals `value`.
    pub fn find_by_field(&self, field: &str, value: impl Into<Value>) -> DeferredStream<'_, T> {
        let field = field.to_string();
        let value = value.into();
        self.documents(async move {
            tracing::debug!(
                collection = self.mapping.collection_name,
                field = %field,
                value = %value,
                "Derived query"
            );
            self.store
                .find_by_field(self.mapping.collection_name, &field, &value)
                .await
        })
    }

    /// Turn a deferred batch of raw documents into a deferred entity stream.
    fn documents<'a>(
        &'a self,
        fetch: impl Future<Output = Result<Vec<Value>>> + Send + 'a,
    ) -> DeferredStream<'a, T> {
        stream::once(fetch)
            .map_ok(|docs| stream::iter(docs.into_iter().map(decode::<T>)))
            .try_flatten()
            .boxed()
    }

    async fn save_document(&self, entity: T) -> Result<T> {
        let document = serde_json::to_value(&entity)?;
        let id = self.mapping.id_of(&document)?;
        let partition_key = self.mapping.partition_key_of(&document)?;

        tracing::debug!(
            collection = self.mapping.collection_name,
            id = %id,
            partition_key = %partition_key,
            "Saving document"
        );
        self.store
            .upsert(
                self.mapping.collection_name,
                &partition_key,
                &id,
                document.clone(),
            )
            .await?;

        decode(document)
    }

    async fn load(&self, id: &str) -> Result<Option<T>> {
        let document = self
            .store
            .find_by_id(self.mapping.collection_name, id)
            .await?;
        tracing::debug!(
            collection = self.mapping.collection_name,
            id,
            found = document.is_some(),
            "Find by id"
        );
        document.map(decode).transpose()
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let document = self
            .store
            .find_by_id(self.mapping.collection_name, id)
            .await?;
        Ok(document.is_some())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let existed = self
            .store
            .delete_by_id(self.mapping.collection_name, id)
            .await?;
        tracing::debug!(
            collection = self.mapping.collection_name,
            id,
            existed,
            "Deleted document"
        );
        Ok(())
    }

    async fn remove_entity(&self, entity: T) -> Result<()> {
        let document = serde_json::to_value(&entity)?;
        let id = self.mapping.id_of(&document)?;
        self.remove(&id).await
    }

    async fn clear(&self) -> Result<()> {
        let removed = self.store.delete_all(self.mapping.collection_name).await?;
        tracing::debug!(
            collection = self.mapping.collection_name,
            removed,
            "Cleared collection"
        );
        Ok(())
    }
}

fn decode<T: MappedEntity>(document: Value) -> Result<T> {
    Ok(serde_json::from_value(document)?)
}

impl<T: MappedEntity> ReactiveRepository<T> for DocumentRepository<T> {
    fn save(&self, entity: &T) -> Deferred<'_, T> {
        self.save_document(entity.clone()).boxed()
    }

    fn save_all(&self, entities: Vec<T>) -> DeferredStream<'_, T> {
        stream::iter(entities)
            .then(move |entity| self.save_document(entity))
            .boxed()
    }

    fn find_by_id(&self, id: &str) -> Deferred<'_, Option<T>> {
        let id = id.to_string();
        async move { self.load(&id).await }.boxed()
    }

    fn exists_by_id(&self, id: &str) -> Deferred<'_, bool> {
        let id = id.to_string();
        async move { self.exists(&id).await }.boxed()
    }

    fn find_all(&self) -> DeferredStream<'_, T> {
        self.documents(self.store.find_all(self.mapping.collection_name))
    }

    fn find_all_by_partition_key(&self, partition_key: &str) -> DeferredStream<'_, T> {
        let partition_key = partition_key.to_string();
        self.documents(async move {
            self.store
                .find_by_partition_key(self.mapping.collection_name, &partition_key)
                .await
        })
    }

    fn count(&self) -> Deferred<'_, u64> {
        self.store.count(self.mapping.collection_name)
    }

    fn delete_by_id(&self, id: &str) -> Deferred<'_, ()> {
        let id = id.to_string();
        async move { self.remove(&id).await }.boxed()
    }

    fn delete(&self, entity: &T) -> Deferred<'_, ()> {
        self.remove_entity(entity.clone()).boxed()
    }

    fn delete_all(&self) -> Deferred<'_, ()> {
        self.clear().boxed()
    }
}

impl UserRepository for DocumentRepository<User> {
    fn find_by_first_name(&self, first_name: &str) -> DeferredStream<'_, User> {
        self.find_by_field("firstName", first_name)
    }
}

impl CustomerRepository for DocumentRepository<Customer> {
    fn find_by_first_name(&self, first_name: &str) -> DeferredStream<'_, Customer> {
        self.find_by_field("firstName", first_name)
    }

    fn find_by_last_name(&self, last_name: &str) -> DeferredStream<'_, Customer> {
        self.find_by_field("lastName", last_name)
    }
}
