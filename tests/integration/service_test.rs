//! Account service integration tests
//!
//! Runs the service against the store doubles in `common::stores` to check
//! how store failures surface through the error taxonomy.

use std::sync::Arc;

use assert_matches::assert_matches;
use usermgmt::backend::auth::{AccountUpdate, NewAccount, NewUser, UserStore};
use usermgmt::backend::error::AccountError;

use crate::common::{create_test_user, test_service, test_service_with_store, FailingStore, RacingStore};

fn stored(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$placeholder".to_string(),
        display_name: None,
        is_active: true,
    }
}

#[tokio::test]
async fn test_alice_walkthrough() {
    let service = test_service();

    let alice = assert_ok!(
        service
            .create_account(NewAccount::new("alice", "a@x.com", "p"))
            .await
    );
    assert_eq!(alice.id, 1);
    assert_ne!(alice.password_hash, "p");

    // Same username with a different email is rejected on creation too
    assert_err!(
        service
            .create_account(NewAccount::new("alice", "other@x.com", "q"))
            .await,
        AccountError::Duplicate { .. }
    );

    let token = assert_ok!(service.authenticate("a@x.com", "p").await);
    let identity = assert_ok!(service.authorize(&token).await);
    assert_eq!(identity.user_id, alice.id);
    assert_eq!(identity.email, "a@x.com");

    assert_err!(
        service.authenticate("a@x.com", "wrong").await,
        AccountError::InvalidCredentials
    );
}

#[tokio::test]
async fn test_create_race_reports_duplicate() {
    let store = Arc::new(RacingStore::default());
    store.inner.create(stored("alice", "a@x.com")).await.unwrap();
    let service = test_service_with_store(store);

    let result = service
        .create_account(NewAccount::new("bob", "a@x.com", "p"))
        .await;

    assert_matches!(
        result,
        Err(AccountError::Duplicate { resource, value }) if resource == "email" && value == "a@x.com"
    );
}

#[tokio::test]
async fn test_update_race_reports_duplicate() {
    let store = Arc::new(RacingStore::default());
    store.inner.create(stored("alice", "a@x.com")).await.unwrap();
    let bob = store.inner.create(stored("bob", "b@x.com")).await.unwrap();
    let service = test_service_with_store(store);

    let mut update = AccountUpdate::from_user(&bob);
    update.username = "alice".to_string();

    assert_matches!(
        service.update_account(bob.id, update).await,
        Err(AccountError::Duplicate { resource, .. }) if resource == "username"
    );
}

#[tokio::test]
async fn test_backend_failures_are_unknown() {
    let service = test_service_with_store(Arc::new(FailingStore));

    assert_err!(service.get_account(1).await, AccountError::Unknown { .. });
    assert_err!(service.list_accounts().await, AccountError::Unknown { .. });
    assert_err!(service.delete_account(1).await, AccountError::Unknown { .. });
    assert_err!(
        service
            .create_account(NewAccount::new("alice", "a@x.com", "p"))
            .await,
        AccountError::Unknown { .. }
    );
    assert_err!(
        service.authenticate("a@x.com", "p").await,
        AccountError::Unknown { .. }
    );
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    let service = test_service_with_store(Arc::new(FailingStore));

    assert_err!(
        service
            .create_account(NewAccount::new("", "a@x.com", "p"))
            .await,
        AccountError::Validation { .. }
    );
    assert_err!(service.get_account(-5).await, AccountError::Validation { .. });
}

#[tokio::test]
async fn test_authorize_with_unreachable_store() {
    let service = test_service_with_store(Arc::new(FailingStore));
    let token = service.tokens().issue(1, "a@x.com").unwrap();

    assert_err!(service.authorize(&token).await, AccountError::Unknown { .. });
    assert_err!(service.authorize("garbage").await, AccountError::InvalidToken);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let service = test_service();
    let user = create_test_user(&service, "alice", "a@x.com", "p").await;

    let other = usermgmt::backend::auth::TokenIssuer::new(
        "another-secret",
        std::time::Duration::from_secs(300),
    );
    let forged = other.issue(user.id, &user.email).unwrap();

    assert_ok!(service.authorize(&user.token).await);
    assert_err!(service.authorize(&forged).await, AccountError::InvalidToken);
}

#[tokio::test]
async fn test_list_returns_all_in_id_order() {
    let service = test_service();
    for (name, email) in [("alice", "a@x.com"), ("bob", "b@x.com"), ("carol", "c@x.com")] {
        service
            .create_account(NewAccount::new(name, email, "p"))
            .await
            .unwrap();
    }

    let users = service.list_accounts().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}
