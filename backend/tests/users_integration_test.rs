//! Integration tests for the user management endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_count_tracks_registrations() {
    let app = common::TestApp::new();

    let empty = app.get("/users/count").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json()["count"], 0);
    assert_eq!(empty.json()["message"], "Total number of users");

    app.register("alice", "a@x.com", "pw1").await;
    app.register("bob", "b@x.com", "pw2").await;

    assert_eq!(app.get("/users/count").await.json()["count"], 2);
}

#[tokio::test]
async fn test_list_users_in_id_order() {
    let app = common::TestApp::new();
    app.register("alice", "a@x.com", "pw1").await;
    app.register("bob", "b@x.com", "pw2").await;
    let token = app.login("b@x.com", "pw2").await;

    let response = app.get_auth("/users", &token).await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.json()["users"].as_array().unwrap().clone();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[1]["username"], "bob");
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = common::TestApp::new();

    let response = app.get("/users/999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_get_user_non_numeric_id() {
    let app = common::TestApp::new();

    let response = app.get("/users/abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["code"], "BAD_REQUEST");

    let response = app.delete("/users/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_update_missing_username_field() {
    let app = common::TestApp::new();
    let user = app.register("alice", "a@x.com", "pw1").await;

    let response = app
        .put(&format!("/users/{}", user["id"]), json!({ "name": "alicia" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_username() {
    let app = common::TestApp::new();
    let user = app.register("alice", "a@x.com", "pw1").await;
    let id = user["id"].as_i64().unwrap();

    let response = app
        .put(&format!("/users/{}", id), json!({ "username": " Alicia " }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Username updated successfully");
    assert_eq!(response.json()["user"]["username"], "alicia");

    let fetched = app.get(&format!("/users/{}", id)).await.json();
    assert_eq!(fetched["user"]["username"], "alicia");
}

#[tokio::test]
async fn test_update_username_to_own_name() {
    let app = common::TestApp::new();
    let user = app.register("alice", "a@x.com", "pw1").await;

    let response = app
        .put(
            &format!("/users/{}", user["id"]),
            json!({ "username": "alice" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_username_conflict() {
    let app = common::TestApp::new();
    app.register("alice", "a@x.com", "pw1").await;
    let bob = app.register("bob", "b@x.com", "pw2").await;

    let response = app
        .put(&format!("/users/{}", bob["id"]), json!({ "username": "Alice" }))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);

    let fetched = app.get(&format!("/users/{}", bob["id"])).await.json();
    assert_eq!(fetched["user"]["username"], "bob");
}

#[tokio::test]
async fn test_update_missing_user() {
    let app = common::TestApp::new();

    let response = app.put("/users/42", json!({ "username": "ghost" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_empty_username_rejected() {
    let app = common::TestApp::new();
    let user = app.register("alice", "a@x.com", "pw1").await;

    let response = app
        .put(&format!("/users/{}", user["id"]), json!({ "username": "   " }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user() {
    let app = common::TestApp::new();
    let user = app.register("alice", "a@x.com", "pw1").await;
    let path = format!("/users/{}", user["id"]);

    let response = app.delete(&path).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "User deleted");

    assert_eq!(app.get(&path).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/users/count").await.json()["count"], 0);
}

#[tokio::test]
async fn test_delete_missing_user_leaves_count() {
    let app = common::TestApp::new();
    app.register("alice", "a@x.com", "pw1").await;

    let response = app.delete("/users/999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/users/count").await.json()["count"], 1);
}

#[tokio::test]
async fn test_deleted_user_token_rejected() {
    let app = common::TestApp::new();
    let user = app.register("alice", "a@x.com", "pw1").await;
    let token = app.login("a@x.com", "pw1").await;

    app.delete(&format!("/users/{}", user["id"])).await;

    assert_eq!(
        app.get_auth("/me", &token).await.status,
        StatusCode::UNAUTHORIZED
    );
}
