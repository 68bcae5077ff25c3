//! Account API integration tests
//!
//! Tests for account creation, listing, lookup, update and deletion.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{login, register, send, test_app};

#[tokio::test]
async fn test_create_account_success() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "p",
            "display_name": "Alice"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["display_name"], "Alice");
    assert_eq!(body["is_active"], true);
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_account_duplicate_email() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "p").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "username": "bob", "email": "a@x.com", "password": "q" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already exists: a@x.com");
}

#[tokio::test]
async fn test_create_account_validation() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "p",
            "display_name": "alice"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_contains!(
        body["error"].as_str().unwrap_or_default(),
        "display name can't be the same as username"
    );

    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "username": "alice", "email": "a@x.com", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_get_accounts() {
    let app = test_app();
    let alice = register(&app, "alice", "a@x.com", "p").await;
    let bob = register(&app, "bob", "b@x.com", "q").await;
    let token = login(&app, "a@x.com", "p").await;

    let (status, body) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .expect("array of users")
        .iter()
        .filter_map(|u| u["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![alice, bob]);

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", bob), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "b@x.com");

    let (status, _) = send(&app, Method::GET, "/users/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_requires_token() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "p").await;

    let (status, _) = send(&app, Method::GET, "/users", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_account() {
    let app = test_app();
    let id = register(&app, "alice", "a@x.com", "p").await;
    register(&app, "bob", "b@x.com", "q").await;
    let token = login(&app, "a@x.com", "p").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({
            "username": "alice",
            "email": "a@x.com",
            "display_name": "Alice A.",
            "is_active": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Alice A.");
    assert_eq!(body["is_active"], false);

    // Old password still works when none was supplied
    login(&app, "a@x.com", "p").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({ "username": "bob", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "username already exists: bob");
}

#[tokio::test]
async fn test_update_password() {
    let app = test_app();
    let id = register(&app, "alice", "a@x.com", "p").await;
    let token = login(&app, "a@x.com", "p").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({ "username": "alice", "email": "a@x.com", "password": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(&app, "a@x.com", "new").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_account() {
    let app = test_app();
    let alice = register(&app, "alice", "a@x.com", "p").await;
    let bob = register(&app, "bob", "b@x.com", "q").await;
    let token = login(&app, "a@x.com", "p").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/users/{}", bob), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = send(&app, Method::DELETE, &format!("/users/{}", bob), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &format!("/users/{}", alice), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_negative_id_is_validation_error() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "p").await;
    let token = login(&app, "a@x.com", "p").await;

    let (status, body) = send(&app, Method::GET, "/users/-1", Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_contains!(body["error"].as_str().unwrap_or_default(), "id cannot be negative");
}

#[tokio::test]
async fn test_malformed_body_is_json_validation_error() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "username": "alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_contains!(body["error"].as_str().unwrap_or_default(), "body");
}

#[tokio::test]
async fn test_non_numeric_id_is_json_validation_error() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "p").await;
    let token = login(&app, "a@x.com", "p").await;

    let (status, body) = send(&app, Method::GET, "/users/abc", Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_contains!(body["error"].as_str().unwrap_or_default(), "'id'");
}
