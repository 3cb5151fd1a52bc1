//! # Document Repository Demo - Domain Model
//!
//! Entity types persisted through the document repository layer. These are
//! passive data holders: an identifier, a handful of string fields and a
//! human-readable rendering for diagnostic output. Persistence metadata
//! (collection, id field, partition key) lives with the repository layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// User entity - identified by a caller-supplied id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    first_name: String,
    last_name: String,
    address: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User[id={}, firstName='{}', lastName='{}', address='{}']",
            self.id, self.first_name, self.last_name, self.address
        )
    }
}

/// Customer entity - id generated at construction, last name is the
/// partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: String,
    first_name: String,
    last_name: String,
}

impl Customer {
    /// Create a customer with a fresh random (v4) id.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), first_name, last_name)
    }

    /// Rebuild a customer whose id is already known.
    pub fn with_id(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer[id={}, firstName='{}', lastName='{}']",
            self.id, self.first_name, self.last_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::name::en::{FirstName, LastName};

    #[test]
    fn user_keeps_supplied_fields() {
        let user = User::new("1", "Tasha", "Calderon", "4567 Main St Buffalo, NY 98052");

        assert_eq!(user.id(), "1");
        assert_eq!(user.first_name(), "Tasha");
        assert_eq!(user.last_name(), "Calderon");
        assert_eq!(user.address(), "4567 Main St Buffalo, NY 98052");
    }

    #[test]
    fn user_display() {
        let user = User::new("1", "Tasha", "Calderon", "4567 Main St");
        assert_eq!(
            user.to_string(),
            "User[id=1, firstName='Tasha', lastName='Calderon', address='4567 Main St']"
        );
    }

    #[test]
    fn customer_gets_uuid_id() {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let customer = Customer::new(first.as_str(), last.as_str());

        assert!(Uuid::parse_str(customer.id()).is_ok());
        assert_eq!(customer.first_name(), first);
        assert_eq!(customer.last_name(), last);
    }

    #[test]
    fn customers_get_distinct_ids() {
        let a = Customer::new("Alice", "Smith");
        let b = Customer::new("Alice", "Smith");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn customer_display() {
        let customer = Customer::with_id("c-1", "Alice", "Smith");
        assert_eq!(
            customer.to_string(),
            "Customer[id=c-1, firstName='Alice', lastName='Smith']"
        );
    }

    #[test]
    fn documents_use_camel_case_fields() {
        let customer = Customer::with_id("c-1", "Bob", "Smith");
        let doc = serde_json::to_value(&customer).unwrap();

        assert_eq!(doc["id"], "c-1");
        assert_eq!(doc["firstName"], "Bob");
        assert_eq!(doc["lastName"], "Smith");

        let back: Customer = serde_json::from_value(doc).unwrap();
        assert_eq!(back, customer);
    }
}
