use std::sync::Arc;

use docstore_domain::{Customer, User};
use docstore_persistence::{
    CustomerRepository, DeferredOptionExt, DeferredStreamExt, DocumentRepository,
    MemoryDocumentStore, ReactiveRepository, UserRepository,
};
use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::name::en::{FirstName, LastName};

fn user_repo() -> DocumentRepository<User> {
    DocumentRepository::for_entity(Arc::new(MemoryDocumentStore::new()))
}

fn customer_repo() -> DocumentRepository<Customer> {
    DocumentRepository::for_entity(Arc::new(MemoryDocumentStore::new()))
}

fn random_user(id: usize) -> User {
    User::new(
        id.to_string(),
        FirstName().fake::<String>(),
        LastName().fake::<String>(),
        StreetName().fake::<String>(),
    )
}

#[tokio::test]
async fn lookup_before_save_is_absent_and_after_save_matches() {
    let repo = user_repo();

    for id in 0..20 {
        let user = random_user(id);

        assert!(repo.find_by_id(user.id()).await.unwrap().is_none());

        repo.save(&user).await.unwrap();

        let found = repo.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), user.id());
        assert_eq!(found.first_name(), user.first_name());
        assert_eq!(found.last_name(), user.last_name());
        assert_eq!(found.address(), user.address());
    }
}

#[tokio::test]
async fn delete_all_empties_collection_for_any_prior_state() {
    let repo = customer_repo();

    for batch in [0usize, 1, 7] {
        let customers = (0..batch)
            .map(|_| Customer::new(FirstName().fake::<String>(), LastName().fake::<String>()))
            .collect();
        repo.save_all(customers).collect_list().await.unwrap();

        repo.delete_all().await.unwrap();

        assert!(repo.find_all().collect_list().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}

#[tokio::test]
async fn find_by_last_name_returns_exact_subset() {
    let repo = customer_repo();
    let last_names = ["Smith", "Jones", "Smith", "Nguyen", "Smith"];

    let mut saved = Vec::new();
    for last in last_names {
        let customer = Customer::new(FirstName().fake::<String>(), last);
        saved.push(repo.save(&customer).await.unwrap());
    }

    for last in ["Smith", "Jones", "Nguyen", "Unmatched"] {
        let mut expected: Vec<String> = saved
            .iter()
            .filter(|c| c.last_name() == last)
            .map(|c| c.id().to_string())
            .collect();
        let mut actual: Vec<String> = repo
            .find_by_last_name(last)
            .collect_list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        expected.sort();
        actual.sort();

        assert_eq!(actual, expected, "last name {last}");
    }
}

#[tokio::test]
async fn tasha_calderon_scenario() {
    let repo = user_repo();
    let user = User::new("1", "Tasha", "Calderon", "4567 Main St Buffalo, NY 98052");

    repo.save(&user).await.unwrap();

    let found = repo.find_by_id("1").require("User", "1").await.unwrap();
    assert_eq!(found.first_name(), "Tasha");
    assert_eq!(found.last_name(), "Calderon");

    let by_first = repo.find_by_first_name("Tasha").collect_list().await.unwrap();
    assert_eq!(by_first, vec![user]);
}

#[tokio::test]
async fn alice_and_bob_smith_scenario() {
    let repo = customer_repo();
    let alice = Customer::new("Alice", "Smith");
    let bob = Customer::new("Bob", "Smith");
    repo.save(&alice).await.unwrap();
    repo.save(&bob).await.unwrap();

    let smiths = repo.find_by_last_name("Smith").collect_list().await.unwrap();
    assert_eq!(smiths.len(), 2);
    assert!(smiths.contains(&alice));
    assert!(smiths.contains(&bob));

    let alices = repo.find_by_first_name("Alice").collect_list().await.unwrap();
    assert_eq!(alices, vec![alice.clone()]);

    let first = repo.find_by_first_name("Alice").first().await.unwrap();
    assert_eq!(first, Some(alice));
}

#[test]
fn save_handle_does_nothing_until_polled() {
    let store = Arc::new(MemoryDocumentStore::new());
    let repo: DocumentRepository<Customer> = DocumentRepository::for_entity(store.clone());
    let customer = Customer::new("Alice", "Smith");

    let pending = repo.save(&customer);
    let clear = repo.delete_all();
    assert_eq!(store.operations(), 0);
    drop(clear);

    tokio_test::block_on(pending).unwrap();
    assert_eq!(store.operations(), 1);

    let found = tokio_test::block_on(repo.find_by_id(customer.id())).unwrap();
    assert_eq!(found, Some(customer));
}
