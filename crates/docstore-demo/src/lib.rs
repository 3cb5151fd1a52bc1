//! # Document Repository Demo
//!
//! One-shot runner that clears the collections, saves and queries sample
//! users and customers through the deferred repositories, then clears the
//! users again.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod runner;

use std::sync::Arc;

use docstore_domain::{Customer, User};
use docstore_persistence::{DocumentRepository, SharedDocumentStore, connect};

pub use config::{Config, LogFormat};
pub use error::{DemoError, Result};
pub use runner::{DemoReport, DemoRunner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a runner whose repositories share one store.
pub fn runner_for(store: &SharedDocumentStore) -> DemoRunner {
    let users = Arc::new(DocumentRepository::<User>::for_entity(store.clone()));
    let customers = Arc::new(DocumentRepository::<Customer>::for_entity(store.clone()));
    DemoRunner::new(users, customers)
}

/// Connect the configured store and run the demo once.
///
/// # Errors
///
/// Returns the first connection, driver or check failure.
pub async fn run(config: &Config) -> Result<DemoReport> {
    let store = connect(&config.store).await?;
    runner_for(&store).run().await
}
