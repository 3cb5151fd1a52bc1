//! # Repository Traits
//!
//! Abstract repository interfaces over a document collection. Every method
//! returns a deferred handle; building the handle does not touch the store.

use docstore_domain::{Customer, User};

use crate::deferred::{Deferred, DeferredStream};

// =============================================================================
// GENERIC REPOSITORY
// =============================================================================

/// CRUD capability set over one collection, keyed by string id.
pub trait ReactiveRepository<T>: Send + Sync {
    /// Insert or replace by id; resolves to the persisted entity.
    fn save(&self, entity: &T) -> Deferred<'_, T>;

    /// Save each entity in order.
    fn save_all(&self, entities: Vec<T>) -> DeferredStream<'_, T>;

    /// Resolves to `None` when no record has this id.
    fn find_by_id(&self, id: &str) -> Deferred<'_, Option<T>>;

    fn exists_by_id(&self, id: &str) -> Deferred<'_, bool>;

    /// All records, in store-defined order.
    fn find_all(&self) -> DeferredStream<'_, T>;

    /// Records sharing a partition key.
    fn find_all_by_partition_key(&self, partition_key: &str) -> DeferredStream<'_, T>;

    fn count(&self) -> Deferred<'_, u64>;

    /// Deleting a missing id succeeds.
    fn delete_by_id(&self, id: &str) -> Deferred<'_, ()>;

    fn delete(&self, entity: &T) -> Deferred<'_, ()>;

    /// Remove every record. Succeeds on an empty collection.
    fn delete_all(&self) -> Deferred<'_, ()>;
}

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Repository for User documents
pub trait UserRepository: ReactiveRepository<User> {
    fn find_by_first_name(&self, first_name: &str) -> DeferredStream<'_, User>;
}

// =============================================================================
// CUSTOMER REPOSITORY
// =============================================================================

/// Repository for Customer documents
pub trait CustomerRepository: ReactiveRepository<Customer> {
    fn find_by_first_name(&self, first_name: &str) -> DeferredStream<'_, Customer>;

    fn find_by_last_name(&self, last_name: &str) -> DeferredStream<'_, Customer>;
}
