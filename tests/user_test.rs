mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users")
        .json(&json!({
            "full_name": "Anna Girken",
            "email": "anna@example.com"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["full_name"].as_str().unwrap(), "Anna Girken");
    assert_eq!(body["email"].as_str().unwrap(), "anna@example.com");
    assert_eq!(body["role"].as_str().unwrap(), "member");
}

#[tokio::test]
async fn test_create_user_with_role() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users")
        .json(&json!({
            "full_name": "Max Mustermann",
            "email": "max@example.com",
            "role": "admin"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["role"].as_str().unwrap(), "admin");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::new().await;

    let first = app
        .server
        .post("/api/users")
        .json(&json!({
            "full_name": "Anna Girken",
            "email": "anna@example.com"
        }))
        .await;
    first.assert_status(StatusCode::OK);

    let second = app
        .server
        .post("/api/users")
        .json(&json!({
            "full_name": "Another Anna",
            "email": "anna@example.com"
        }))
        .await;

    second.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = second.json();
    assert_eq!(body["error"].as_str().unwrap(), "Conflict");
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_user("Anna Girken").await;
    factory.create_user("Max Mustermann").await;

    let response = app.server.get("/api/users").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_i64().unwrap(), 2);
}
