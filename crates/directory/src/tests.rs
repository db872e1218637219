//! Use-case layer tests covering the permission model end to end.

use deskbook_auth::verify_secret;
use deskbook_core::{AccessLevel, DirectoryError, Role};
use deskbook_store::{DirectoryDb, UserRow};
use serde_json::json;

use super::{ClientPatch, Directory, NewUser, Page};

async fn test_directory() -> (Directory, DirectoryDb) {
    let db = DirectoryDb::open_in_memory().await.unwrap();
    (Directory::new(db.clone()), db)
}

async fn admin(dir: &Directory) -> UserRow {
    dir.ensure_admin("root", "root-pw").await.unwrap();
    dir.user_for_token("root").await.unwrap()
}

async fn plain_user(dir: &Directory, actor: &UserRow, username: &str) -> UserRow {
    dir.create_user(
        actor,
        NewUser {
            username: username.to_string(),
            password: format!("{username}-pw"),
            email: None,
            role: Role::User,
        },
    )
    .await
    .unwrap()
}

fn patch(value: serde_json::Value) -> ClientPatch {
    serde_json::from_value(value).unwrap()
}

fn page1() -> Page {
    Page { number: 1, size: 100 }
}

#[tokio::test]
async fn creator_owns_the_new_client_and_nobody_else_does() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;
    let alice = plain_user(&dir, &root, "alice").await;

    dir.add_peer(&bob, "srv1", patch(json!({}))).await.unwrap();

    let client = db.find_client_by_key("srv1").await.unwrap().unwrap();
    assert_eq!(client.created_by, Some(bob.id));
    assert_eq!(
        db.get_grant_level(bob.id, client.id).await.unwrap(),
        Some(AccessLevel::Admin)
    );
    assert_eq!(db.get_grant_level(alice.id, client.id).await.unwrap(), None);
}

#[tokio::test]
async fn grant_flow_scenario() {
    let (dir, _db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;
    let alice = plain_user(&dir, &root, "alice").await;

    // bob registers srv1 and becomes its owner.
    dir.add_peer(&bob, "srv1", patch(json!({}))).await.unwrap();

    // alice has no grant: update is forbidden.
    let err = dir
        .update_peer(&alice, "srv1", patch(json!({"alias": "a"})))
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::Forbidden);

    // admin grants alice write; her update now succeeds.
    let client_id = _db.find_client_by_key("srv1").await.unwrap().unwrap().id;
    dir.grant(&root, alice.id, client_id, AccessLevel::Write)
        .await
        .unwrap();
    dir.update_peer(&alice, "srv1", patch(json!({"alias": "a"})))
        .await
        .unwrap();

    // write does not reach delete, which needs admin level.
    let err = dir.delete_peer(&alice, "srv1").await.unwrap_err();
    assert_eq!(err, DirectoryError::Forbidden);

    // the owner's automatic admin grant does.
    dir.delete_peer(&bob, "srv1").await.unwrap();
}

#[tokio::test]
async fn admin_role_bypasses_grants_entirely() {
    let (dir, _db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;

    dir.add_peer(&bob, "srv1", patch(json!({}))).await.unwrap();

    // root holds no grant on srv1 but may update and delete it.
    dir.update_peer(&root, "srv1", patch(json!({"alias": "managed"})))
        .await
        .unwrap();
    dir.delete_peer(&root, "srv1").await.unwrap();
}

#[tokio::test]
async fn add_normalizes_whitespace_and_upserts() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;

    dir.add_peer(&bob, "  AB 12  ", patch(json!({"alias": "first"})))
        .await
        .unwrap();

    // Same identifier modulo whitespace: updates instead of duplicating.
    dir.add_peer(&bob, "AB12", patch(json!({"alias": "second"})))
        .await
        .unwrap();

    assert_eq!(db.count_clients().await.unwrap(), 1);
    let client = db.find_client_by_key("AB12").await.unwrap().unwrap();
    assert_eq!(client.alias.as_deref(), Some("second"));
}

#[tokio::test]
async fn empty_identifier_is_rejected() {
    let (dir, _db) = test_directory().await;
    let root = admin(&dir).await;

    let err = dir.add_peer(&root, "   ", patch(json!({}))).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));
}

#[tokio::test]
async fn update_never_creates() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;

    let err = dir
        .update_peer(&root, "ghost", patch(json!({"alias": "x"})))
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::NotFound);
    assert_eq!(db.count_clients().await.unwrap(), 0);
}

#[tokio::test]
async fn partial_update_distinguishes_omitted_from_cleared() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;

    dir.add_peer(
        &bob,
        "srv1",
        patch(json!({"alias": "box", "note": "rack 4", "tags": ["prod"]})),
    )
    .await
    .unwrap();

    // note cleared explicitly, alias omitted, tags replaced.
    dir.update_peer(
        &bob,
        "srv1",
        patch(json!({"note": null, "tags": ["prod", "db", "prod"]})),
    )
    .await
    .unwrap();

    let client = db.find_client_by_key("srv1").await.unwrap().unwrap();
    assert_eq!(client.alias.as_deref(), Some("box"));
    assert_eq!(client.notes, None);
    assert_eq!(client.tag_list(), ["prod", "db"]);
}

#[tokio::test]
async fn secret_rehashes_only_when_non_empty() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;

    dir.add_peer(&bob, "srv1", patch(json!({"password": "open-sesame"})))
        .await
        .unwrap();

    let client = db.find_client_by_key("srv1").await.unwrap().unwrap();
    let hash = client.access_hash.clone().unwrap();
    assert!(verify_secret("open-sesame", &hash));

    // Empty password in a later patch leaves the stored secret alone.
    dir.update_peer(&bob, "srv1", patch(json!({"password": ""})))
        .await
        .unwrap();
    let client = db.find_client_by_key("srv1").await.unwrap().unwrap();
    assert_eq!(client.access_hash.as_deref(), Some(hash.as_str()));
}

#[tokio::test]
async fn listing_respects_visibility_and_pagination() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;
    let alice = plain_user(&dir, &root, "alice").await;

    for i in 0..3 {
        dir.add_peer(&bob, &format!("srv{i}"), patch(json!({})))
            .await
            .unwrap();
    }

    // bob sees his three, alice none, admin everything.
    assert_eq!(dir.list_peers(&bob, page1()).await.unwrap().total, 3);
    assert_eq!(dir.list_peers(&alice, page1()).await.unwrap().total, 0);
    assert_eq!(dir.list_peers(&root, page1()).await.unwrap().total, 3);

    // 1-indexed pages, stable order, total unaffected by the slice.
    let page = dir
        .list_peers(&bob, Page { number: 2, size: 2 })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.clients.len(), 1);
    assert_eq!(page.clients[0].client_key, "srv2");

    // A read grant is enough to appear in alice's listing.
    let client_id = db.find_client_by_key("srv0").await.unwrap().unwrap().id;
    dir.grant(&root, alice.id, client_id, AccessLevel::Read)
        .await
        .unwrap();
    assert_eq!(dir.list_peers(&alice, page1()).await.unwrap().total, 1);
}

#[tokio::test]
async fn extreme_page_parameters_do_not_crash() {
    let (dir, _db) = test_directory().await;
    let root = admin(&dir).await;
    dir.add_peer(&root, "srv1", patch(json!({}))).await.unwrap();

    // Page parameters come straight off the wire; the worst case must yield
    // an empty slice, not an arithmetic panic.
    let page = dir
        .list_peers(
            &root,
            Page {
                number: u32::MAX,
                size: u32::MAX,
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.clients.is_empty());

    let page = dir
        .list_peers(&root, Page { number: 0, size: 0 })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.clients.is_empty());
}

#[tokio::test]
async fn granting_is_admin_role_only() {
    let (dir, db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;
    let alice = plain_user(&dir, &root, "alice").await;

    dir.add_peer(&bob, "srv1", patch(json!({}))).await.unwrap();
    let client_id = db.find_client_by_key("srv1").await.unwrap().unwrap().id;

    // Even the client's owner cannot grant: that is a system-role check.
    let err = dir
        .grant(&bob, alice.id, client_id, AccessLevel::Read)
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::Forbidden);

    // Unknown targets surface as NotFound.
    let err = dir
        .grant(&root, 9999, client_id, AccessLevel::Read)
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::NotFound);
}

#[tokio::test]
async fn user_management_is_admin_role_only() {
    let (dir, _db) = test_directory().await;
    let root = admin(&dir).await;
    let bob = plain_user(&dir, &root, "bob").await;

    let err = dir
        .create_user(
            &bob,
            NewUser {
                username: "eve".to_string(),
                password: "pw".to_string(),
                email: None,
                role: Role::User,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::Forbidden);

    let err = dir.list_users(&bob).await.unwrap_err();
    assert_eq!(err, DirectoryError::Forbidden);

    // Duplicate usernames conflict.
    let err = dir
        .create_user(
            &root,
            NewUser {
                username: "bob".to_string(),
                password: "pw".to_string(),
                email: None,
                role: Role::User,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Conflict(_)));
}

#[tokio::test]
async fn authentication_does_not_reveal_which_part_failed() {
    let (dir, _db) = test_directory().await;
    let root = admin(&dir).await;
    plain_user(&dir, &root, "bob").await;

    let user = dir.authenticate("bob", "bob-pw").await.unwrap();
    assert_eq!(user.username, "bob");

    let wrong_password = dir.authenticate("bob", "nope").await.unwrap_err();
    let unknown_user = dir.authenticate("nobody", "nope").await.unwrap_err();
    assert_eq!(wrong_password, DirectoryError::InvalidCredentials);
    assert_eq!(unknown_user, DirectoryError::InvalidCredentials);
}

#[tokio::test]
async fn bootstrap_admin_is_idempotent() {
    let (dir, _db) = test_directory().await;

    assert!(dir.ensure_admin("root", "pw").await.unwrap());
    assert!(!dir.ensure_admin("root", "other-pw").await.unwrap());

    // The original credentials still hold.
    assert!(dir.authenticate("root", "pw").await.is_ok());
}
