//! Demo orchestration: setup, exercise, teardown.
//!
//! Every step awaits its deferred handle before the next one starts.

use std::sync::Arc;

use docstore_domain::{Customer, User};
use docstore_persistence::{
    CustomerRepository, DeferredOptionExt, DeferredStreamExt, MappedEntity, ReactiveRepository,
    UserRepository,
};
use tracing::{info, warn};

use crate::error::{DemoError, Result, ensure};

/// What the customer flow observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoReport {
    pub customers_listed: usize,
    pub first_name_match: Option<String>,
    pub last_name_matches: usize,
}

/// Sequential demo runner over injected repositories.
pub struct DemoRunner {
    users: Arc<dyn UserRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl DemoRunner {
    pub fn new(users: Arc<dyn UserRepository>, customers: Arc<dyn CustomerRepository>) -> Self {
        Self { users, customers }
    }

    /// Run all three phases. Teardown runs even when the exercise fails;
    /// the exercise error wins.
    ///
    /// # Errors
    ///
    /// Returns the first failed check or driver error.
    pub async fn run(&self) -> Result<DemoReport> {
        self.setup().await?;

        let outcome = self.exercise().await;
        let teardown = self.teardown().await;

        match (outcome, teardown) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), teardown) => {
                if let Err(teardown_err) = teardown {
                    warn!(error = %teardown_err, "Teardown failed after exercise error");
                }
                Err(err)
            }
        }
    }

    /// Clear both collections.
    ///
    /// # Errors
    ///
    /// Propagates driver errors.
    pub async fn setup(&self) -> Result<()> {
        info!("Clear the database");
        self.users.delete_all().await?;
        self.customers.delete_all().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the first failed check or driver error.
    pub async fn exercise(&self) -> Result<DemoReport> {
        self.user_flow().await?;
        self.customer_flow().await
    }

    /// Clear the user collection.
    ///
    /// # Errors
    ///
    /// Propagates driver errors.
    pub async fn teardown(&self) -> Result<()> {
        info!("Cleaning up users");
        self.users.delete_all().await?;
        Ok(())
    }

    /// Save a user and read it back several ways.
    ///
    /// # Errors
    ///
    /// Fails on any mismatch, on a user that exists too early or goes
    /// missing, and on driver errors.
    pub async fn user_flow(&self) -> Result<()> {
        let test_user = User::new("1", "Tasha", "Calderon", "4567 Main St Buffalo, NY 98052");

        info!(user = %test_user, "Saving user");

        // Neither handle reaches the store until awaited.
        let save_user = self.users.save(&test_user);
        let first_name_users = self.users.find_by_first_name("testFirstName");

        let before_save = self.users.find_by_id(test_user.id()).await?;
        ensure(before_save.is_none(), "User must be absent before save")?;

        let saved = save_user.await?;
        ensure(
            saved.first_name() == test_user.first_name(),
            "Saved user first name doesn't match",
        )?;

        info!("Saved user");

        first_name_users.collect_list().await?;

        let required = self
            .users
            .find_by_id(test_user.id())
            .require(User::ENTITY_TYPE, test_user.id())
            .await
            .map_err(DemoError::absent_as_assertion)?;
        check_names(&required, &test_user)?;

        let result = self
            .users
            .find_by_id(test_user.id())
            .await?
            .ok_or_else(|| DemoError::Assertion("Cannot find user".to_string()))?;
        check_names(&result, &test_user)?;

        info!(user = %result, "Found user by find_by_id");
        Ok(())
    }

    /// Save two customers and list them back.
    ///
    /// # Errors
    ///
    /// Propagates driver errors.
    pub async fn customer_flow(&self) -> Result<DemoReport> {
        self.customers.save(&Customer::new("Alice", "Smith")).await?;
        self.customers.save(&Customer::new("Bob", "Smith")).await?;

        info!("Customers found with find_all():");
        let all = self.customers.find_all().collect_list().await?;
        for customer in &all {
            info!("  {customer}");
        }

        let alice = self.customers.find_by_first_name("Alice").first().await?;
        match &alice {
            Some(customer) => info!("Customer found with find_by_first_name('Alice'): {customer}"),
            None => info!("No customer found with find_by_first_name('Alice')"),
        }

        info!("Customers found with find_by_last_name('Smith'):");
        let smiths = self.customers.find_by_last_name("Smith").collect_list().await?;
        for customer in &smiths {
            info!("  {customer}");
        }

        Ok(DemoReport {
            customers_listed: all.len(),
            first_name_match: alice.map(|c| c.first_name().to_string()),
            last_name_matches: smiths.len(),
        })
    }
}

fn check_names(found: &User, expected: &User) -> Result<()> {
    ensure(
        found.first_name() == expected.first_name(),
        "query result firstName doesn't match",
    )?;
    ensure(
        found.last_name() == expected.last_name(),
        "query result lastName doesn't match",
    )
}
