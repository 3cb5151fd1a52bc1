use std::sync::Arc;

use docstore_demo::{DemoError, DemoRunner, runner_for};
use docstore_domain::{Customer, User};
use docstore_persistence::{
    CustomerRepository, Deferred, DeferredStream, DeferredStreamExt, DocumentRepository,
    DocumentStore, MemoryDocumentStore, ReactiveRepository, SharedDocumentStore, UserRepository,
};

#[tokio::test]
async fn demo_runs_against_memory_store() {
    let memory = Arc::new(MemoryDocumentStore::new());
    let store: SharedDocumentStore = memory.clone();

    let report = runner_for(&store).run().await.unwrap();

    assert_eq!(report.customers_listed, 2);
    assert_eq!(report.first_name_match.as_deref(), Some("Alice"));
    assert_eq!(report.last_name_matches, 2);

    // Teardown clears users only.
    assert_eq!(memory.count("users").await.unwrap(), 0);
    assert_eq!(memory.count("customers").await.unwrap(), 2);
}

#[tokio::test]
async fn setup_clears_leftovers_from_previous_runs() {
    let store: SharedDocumentStore = Arc::new(MemoryDocumentStore::new());
    let users = DocumentRepository::<User>::for_entity(store.clone());
    users
        .save(&User::new("1", "Stale", "Record", "nowhere"))
        .await
        .unwrap();

    let runner = runner_for(&store);
    runner.run().await.unwrap();
    let report = runner.run().await.unwrap();

    assert_eq!(report.customers_listed, 2);
}

/// User repository that hands back a different first name on save.
struct RenamingUsers {
    inner: DocumentRepository<User>,
}

impl ReactiveRepository<User> for RenamingUsers {
    fn save(&self, entity: &User) -> Deferred<'_, User> {
        let renamed = User::new(entity.id(), "Someone", entity.last_name(), entity.address());
        let inner = &self.inner;
        Box::pin(async move { inner.save(&renamed).await })
    }

    fn save_all(&self, entities: Vec<User>) -> DeferredStream<'_, User> {
        self.inner.save_all(entities)
    }

    fn find_by_id(&self, id: &str) -> Deferred<'_, Option<User>> {
        self.inner.find_by_id(id)
    }

    fn exists_by_id(&self, id: &str) -> Deferred<'_, bool> {
        self.inner.exists_by_id(id)
    }

    fn find_all(&self) -> DeferredStream<'_, User> {
        self.inner.find_all()
    }

    fn find_all_by_partition_key(&self, partition_key: &str) -> DeferredStream<'_, User> {
        self.inner.find_all_by_partition_key(partition_key)
    }

    fn count(&self) -> Deferred<'_, u64> {
        self.inner.count()
    }

    fn delete_by_id(&self, id: &str) -> Deferred<'_, ()> {
        self.inner.delete_by_id(id)
    }

    fn delete(&self, entity: &User) -> Deferred<'_, ()> {
        self.inner.delete(entity)
    }

    fn delete_all(&self) -> Deferred<'_, ()> {
        self.inner.delete_all()
    }
}

impl UserRepository for RenamingUsers {
    fn find_by_first_name(&self, first_name: &str) -> DeferredStream<'_, User> {
        self.inner.find_by_first_name(first_name)
    }
}

#[tokio::test]
async fn mismatch_aborts_run_but_teardown_still_clears_users() {
    let memory = Arc::new(MemoryDocumentStore::new());
    let store: SharedDocumentStore = memory.clone();
    let users = Arc::new(RenamingUsers {
        inner: DocumentRepository::for_entity(store.clone()),
    });
    let customers = Arc::new(DocumentRepository::<Customer>::for_entity(store.clone()));
    let runner = DemoRunner::new(users, customers.clone());

    let err = runner.run().await.unwrap_err();

    assert!(matches!(err, DemoError::Assertion(ref msg) if msg.contains("first name")));
    assert_eq!(memory.count("users").await.unwrap(), 0);
    // The customer flow never ran.
    assert!(customers.find_all().collect_list().await.unwrap().is_empty());
}
