//! # Entity Mapping
//!
//! Explicit per-entity persistence metadata: which collection an entity
//! lives in, which document field holds its id and which holds its
//! partition key.

use docstore_domain::{Customer, User};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PersistenceError, Result};

/// Collection, id field and partition-key field for one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMapping {
    pub collection_name: &'static str,
    pub id_field: &'static str,
    pub partition_key_field: &'static str,
}

impl EntityMapping {
    #[must_use]
    pub const fn new(
        collection_name: &'static str,
        id_field: &'static str,
        partition_key_field: &'static str,
    ) -> Self {
        Self {
            collection_name,
            id_field,
            partition_key_field,
        }
    }

    /// Extract the id from a serialized document.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::MissingField`] when the id field is
    /// absent, null or not a string.
    pub fn id_of(&self, document: &Value) -> Result<String> {
        document
            .get(self.id_field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.missing(self.id_field))
    }

    /// Extract the partition key from a serialized document. Non-string
    /// scalars are rendered with their JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::MissingField`] when the field is absent
    /// or null.
    pub fn partition_key_of(&self, document: &Value) -> Result<String> {
        match document.get(self.partition_key_field) {
            Some(Value::String(key)) => Ok(key.clone()),
            Some(Value::Null) | None => Err(self.missing(self.partition_key_field)),
            Some(other) => Ok(other.to_string()),
        }
    }

    fn missing(&self, field: &str) -> PersistenceError {
        PersistenceError::MissingField {
            collection: self.collection_name.to_string(),
            field: field.to_string(),
        }
    }
}

/// An entity type with a fixed mapping.
pub trait MappedEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Short type name used in diagnostics.
    const ENTITY_TYPE: &'static str;

    const MAPPING: EntityMapping;
}

pub const USERS: EntityMapping = EntityMapping::new("users", "id", "lastName");

pub const CUSTOMERS: EntityMapping = EntityMapping::new("customers", "id", "lastName");

impl MappedEntity for User {
    const ENTITY_TYPE: &'static str = "User";
    const MAPPING: EntityMapping = USERS;
}

impl MappedEntity for Customer {
    const ENTITY_TYPE: &'static str = "Customer";
    const MAPPING: EntityMapping = CUSTOMERS;
}
