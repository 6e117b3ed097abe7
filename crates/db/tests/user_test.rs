//! Integration tests for the user repository.

use fundtrack_core::auth::hash_password;
use fundtrack_db::UserRepository;
use fundtrack_db::repositories::UserError;
use fundtrack_shared::Role;

mod common;

#[tokio::test]
async fn test_register_then_authenticate() {
    let db = common::setup().await;
    let repo = UserRepository::new(db);

    let hash = hash_password("hunter2!").expect("Failed to hash");
    let user = repo
        .create("field-office", &hash, Role::Agency)
        .await
        .expect("Failed to create user");

    assert_eq!(user.username, "field-office");
    assert_eq!(user.role, "agency");
    // The plaintext never lands in the store.
    assert_ne!(user.password_hash, "hunter2!");

    let authed = repo
        .authenticate("field-office", "hunter2!")
        .await
        .expect("Authenticate query failed");
    assert_eq!(authed.expect("Expected a match").id, user.id);
}

#[tokio::test]
async fn test_duplicate_username_rejected_across_roles() {
    let db = common::setup().await;
    let repo = UserRepository::new(db);

    let hash = hash_password("pw-one").expect("Failed to hash");
    repo.create("shared-name", &hash, Role::Donor)
        .await
        .expect("First registration should succeed");

    // Same username, different role: still a conflict. Uniqueness is global.
    let err = repo
        .create("shared-name", &hash, Role::Government)
        .await
        .expect_err("Second registration should fail");
    assert!(matches!(err, UserError::DuplicateUsername(name) if name == "shared-name"));
}

#[tokio::test]
async fn test_username_is_case_sensitive() {
    let db = common::setup().await;
    let repo = UserRepository::new(db);

    let hash = hash_password("pw").expect("Failed to hash");
    repo.create("Donor1", &hash, Role::Donor)
        .await
        .expect("Failed to create user");

    assert!(repo.username_exists("Donor1").await.unwrap());
    assert!(!repo.username_exists("donor1").await.unwrap());
    assert!(
        repo.find_by_username("donor1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let db = common::setup().await;
    let repo = UserRepository::new(db);

    let hash = hash_password("right-password").expect("Failed to hash");
    repo.create("ministry", &hash, Role::Government)
        .await
        .expect("Failed to create user");

    let wrong_password = repo
        .authenticate("ministry", "wrong-password")
        .await
        .expect("Query failed");
    let unknown_user = repo
        .authenticate("no-such-user", "right-password")
        .await
        .expect("Query failed");

    // Both failures look the same to the caller.
    assert!(wrong_password.is_none());
    assert!(unknown_user.is_none());
}
