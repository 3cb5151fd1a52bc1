//! # Document Repository Persistence Library
//!
//! Deferred repository layer over a pluggable document-store driver.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Repository Traits                          │
//! │   (ReactiveRepository, UserRepository, CustomerRepository)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              DocumentRepository<T> + EntityMapping           │
//! │         (serde conversion, id / partition key lookup)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  DocumentStore driver                        │
//! │            (MemoryDocumentStore, RedisDocumentStore)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository call returns a [`Deferred`] or [`DeferredStream`]. Nothing
//! reaches the driver until the handle is awaited or iterated.
//!
//! ## Features
//!
//! - `redis`: Enable the Redis driver (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docstore_persistence::{
//!     connect, CustomerRepository, DeferredStreamExt, DocumentRepository, StoreConfig,
//! };
//!
//! let store = connect(&StoreConfig::default()).await?;
//! let customers = DocumentRepository::<Customer>::for_entity(store);
//!
//! customers.save(&Customer::new("Alice", "Smith")).await?;
//! let smiths = customers.find_by_last_name("Smith").collect_list().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod deferred;
pub mod error;
pub mod mapping;
pub mod repository;
pub mod store;

// Re-export commonly used types
pub use deferred::{Deferred, DeferredOptionExt, DeferredStream, DeferredStreamExt};
pub use error::{PersistenceError, Result};
pub use mapping::{CUSTOMERS, EntityMapping, MappedEntity, USERS};
pub use repository::{CustomerRepository, DocumentRepository, ReactiveRepository, UserRepository};
#[cfg(feature = "redis")]
pub use store::RedisDocumentStore;
pub use store::{
    DocumentStore, MemoryDocumentStore, SharedDocumentStore, StoreBackend, StoreConfig, connect,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
