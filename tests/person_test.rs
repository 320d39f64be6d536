mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_person() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;

    let response = app
        .server
        .post("/api/people")
        .json(&json!({
            "company_id": company.id,
            "name": "Jana Meier",
            "email": "jana@acme.example.com"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["company_id"].as_str().unwrap(), company.id.to_string());
    assert_eq!(body["name"].as_str().unwrap(), "Jana Meier");
    assert_eq!(body["email"].as_str().unwrap(), "jana@acme.example.com");
}

#[tokio::test]
async fn test_create_person_unknown_company() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/people")
        .json(&json!({
            "company_id": Uuid::new_v4(),
            "name": "Nobody's Employee"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Validation error");
}

#[tokio::test]
async fn test_list_people_by_company() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let other = factory.create_company().await;

    factory.create_person(company.id).await;
    factory.create_person(company.id).await;
    factory.create_person(other.id).await;

    let response = app
        .server
        .get(&format!("/api/people?company_id={}", company.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_i64().unwrap(), 2);
}

#[tokio::test]
async fn test_get_person_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get(&format!("/api/people/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_person() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let person = factory.create_person(company.id).await;

    let response = app
        .server
        .put(&format!("/api/people/{}", person.id))
        .json(&json!({
            "name": "Jana Meier-Schulz",
            "phone": "+49 30 123456"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Jana Meier-Schulz");
    assert_eq!(body["phone"].as_str().unwrap(), "+49 30 123456");
    // The employer never changes on update
    assert_eq!(body["company_id"].as_str().unwrap(), company.id.to_string());
}

#[tokio::test]
async fn test_delete_person() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let person = factory.create_person(company.id).await;

    let response = app
        .server
        .delete(&format!("/api/people/{}", person.id))
        .await;

    response.assert_status(StatusCode::OK);

    // Verify it's deleted
    let get_response = app
        .server
        .get(&format!("/api/people/{}", person.id))
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}
