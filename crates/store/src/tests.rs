//! Storage layer tests against an in-memory database.

use deskbook_core::{AccessLevel, Role};

use super::db::{DatabaseError, DirectoryDb};
use super::models::NewClient;

async fn test_db() -> DirectoryDb {
    DirectoryDb::open_in_memory().await.unwrap()
}

fn empty_client() -> NewClient {
    NewClient {
        tags: "[]".to_string(),
        ..NewClient::default()
    }
}

// === User tests ===

#[tokio::test]
async fn create_and_find_user() {
    let db = test_db().await;
    let user = db
        .create_user("alice", "hash123", Some("alice@example.com"), Role::User)
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));

    let found = db.find_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);

    assert!(db.find_user_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let db = test_db().await;
    db.create_user("alice", "h1", None, Role::User).await.unwrap();

    let err = db
        .create_user("alice", "h2", None, Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));
}

// === Client tests ===

#[tokio::test]
async fn creating_a_client_grants_admin_to_the_creator() {
    let db = test_db().await;
    let bob = db.create_user("bob", "h", None, Role::User).await.unwrap();

    let client = db
        .create_client_with_owner("srv1", &empty_client(), bob.id)
        .await
        .unwrap();

    assert_eq!(client.client_key, "srv1");
    assert_eq!(client.created_by, Some(bob.id));
    assert_eq!(
        db.get_grant_level(bob.id, client.id).await.unwrap(),
        Some(AccessLevel::Admin)
    );

    // No one else holds anything on the new client.
    let alice = db.create_user("alice", "h", None, Role::User).await.unwrap();
    assert_eq!(db.get_grant_level(alice.id, client.id).await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_client_key_is_a_conflict() {
    let db = test_db().await;
    let bob = db.create_user("bob", "h", None, Role::User).await.unwrap();

    db.create_client_with_owner("srv1", &empty_client(), bob.id)
        .await
        .unwrap();

    let err = db
        .create_client_with_owner("srv1", &empty_client(), bob.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));

    // The failed insert left no partial state behind.
    assert_eq!(db.count_clients().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_cascades_to_grants() {
    let db = test_db().await;
    let bob = db.create_user("bob", "h", None, Role::User).await.unwrap();
    let alice = db.create_user("alice", "h", None, Role::User).await.unwrap();

    let client = db
        .create_client_with_owner("srv1", &empty_client(), bob.id)
        .await
        .unwrap();
    db.upsert_grant(alice.id, client.id, AccessLevel::Read, bob.id)
        .await
        .unwrap();

    db.delete_client(client.id).await.unwrap();

    assert_eq!(db.get_grant_level(bob.id, client.id).await.unwrap(), None);
    assert_eq!(db.get_grant_level(alice.id, client.id).await.unwrap(), None);
    assert!(db.list_grants_for_client(client.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn pagination_is_stable_insertion_order() {
    let db = test_db().await;
    let bob = db.create_user("bob", "h", None, Role::User).await.unwrap();

    for i in 0..5 {
        db.create_client_with_owner(&format!("srv{i}"), &empty_client(), bob.id)
            .await
            .unwrap();
    }

    assert_eq!(db.count_clients_for_user(bob.id).await.unwrap(), 5);

    let first = db.list_clients_for_user_page(bob.id, 2, 0).await.unwrap();
    let second = db.list_clients_for_user_page(bob.id, 2, 2).await.unwrap();
    let keys: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .map(|c| c.client_key.as_str())
        .collect();
    assert_eq!(keys, ["srv0", "srv1", "srv2", "srv3"]);
}

// === Grant tests ===

#[tokio::test]
async fn grant_upsert_overwrites_level_and_grantor() {
    let db = test_db().await;
    let admin = db.create_user("root", "h", None, Role::Admin).await.unwrap();
    let bob = db.create_user("bob", "h", None, Role::User).await.unwrap();
    let alice = db.create_user("alice", "h", None, Role::User).await.unwrap();

    let client = db
        .create_client_with_owner("srv1", &empty_client(), bob.id)
        .await
        .unwrap();

    db.upsert_grant(alice.id, client.id, AccessLevel::Read, bob.id)
        .await
        .unwrap();
    db.upsert_grant(alice.id, client.id, AccessLevel::Write, admin.id)
        .await
        .unwrap();

    assert_eq!(
        db.get_grant_level(alice.id, client.id).await.unwrap(),
        Some(AccessLevel::Write)
    );

    // Still exactly one grant row for the pair.
    let grants = db.list_grants_for_client(client.id).await.unwrap();
    let alice_grants: Vec<_> = grants.iter().filter(|g| g.user_id == alice.id).collect();
    assert_eq!(alice_grants.len(), 1);
    assert_eq!(alice_grants[0].granted_by, Some(admin.id));
}

#[tokio::test]
async fn tag_list_decodes_stored_json() {
    let db = test_db().await;
    let bob = db.create_user("bob", "h", None, Role::User).await.unwrap();

    let fields = NewClient {
        tags: r#"["prod","db"]"#.to_string(),
        ..NewClient::default()
    };
    let client = db
        .create_client_with_owner("srv1", &fields, bob.id)
        .await
        .unwrap();

    assert_eq!(client.tag_list(), ["prod", "db"]);
}
