//! # Repository Module
//!
//! Repository contracts and the generic document-backed implementation.

pub mod document_repository;
pub mod traits;

pub use document_repository::DocumentRepository;
pub use traits::{CustomerRepository, ReactiveRepository, UserRepository};
