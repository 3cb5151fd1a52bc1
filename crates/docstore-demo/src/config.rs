//! # Demo Configuration
//!
//! Environment-based configuration for the demo runner.

use std::env;

use docstore_persistence::{StoreBackend, StoreConfig};

use crate::error::{DemoError, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Demo runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Document store connection
    pub store: StoreConfig,

    /// Logging level, used when `RUST_LOG` is unset
    pub log_level: String,

    /// Logging format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Config`] when a variable holds an unknown value.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Config`] when a variable holds an unknown value.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = StoreConfig::default();

        let backend = match var("STORE_BACKEND") {
            Some(value) => value
                .parse::<StoreBackend>()
                .map_err(|e| DemoError::Config(e.to_string()))?,
            None => defaults.backend,
        };

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(DemoError::Config(format!("unknown LOG_FORMAT '{other}'")));
            }
        };

        Ok(Self {
            store: StoreConfig {
                backend,
                url: var("REDIS_URL").unwrap_or(defaults.url),
                namespace: var("DOCSTORE_NAMESPACE").unwrap_or(defaults.namespace),
            },
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
