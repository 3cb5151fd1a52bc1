//! Demo runner error types

use docstore_persistence::PersistenceError;
use thiserror::Error;

/// Errors that abort a demo run
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DemoError {
    /// Treat a missing record as a failed check rather than a driver fault.
    pub(crate) fn absent_as_assertion(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { .. } => Self::Assertion(err.to_string()),
            other => Self::Persistence(other),
        }
    }
}

/// Result type for demo operations.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Fail the run with `message` unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(DemoError::Assertion(message.to_string()))
    }
}
