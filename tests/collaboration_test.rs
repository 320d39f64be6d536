mod common;

use axum::http::StatusCode;
use collabtrack::error::AppError;
use collabtrack::repositories::CollaborationRepository;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_collaboration() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/collaborations")
        .json(&json!({
            "company_id": company.id,
            "project_id": project.id
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["company_name"].as_str().unwrap(), company.name);
    assert_eq!(body["project_name"].as_str().unwrap(), project.name);
    assert_eq!(body["priority"].as_str().unwrap(), "low");
    assert!(!body["contacted"].as_bool().unwrap());
    // Undetermined tri-states come back as null, not false
    assert!(body["successful"].is_null());
    assert!(body["meeting"].is_null());
    assert!(body["person_id"].is_null());
}

#[tokio::test]
async fn test_create_collaboration_with_all_fields() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let project = factory.create_project().await;
    let person = factory.create_person(company.id).await;

    let response = app
        .server
        .post("/api/collaborations")
        .json(&json!({
            "company_id": company.id,
            "project_id": project.id,
            "person_id": person.id,
            "responsible": "Anna Girken",
            "comment": "Warm lead from the gala",
            "contacted": true,
            "successful": true,
            "letter": true,
            "meeting": false,
            "priority": "high",
            "amount": "2500.25",
            "contact_in_future": true,
            "collab_type": "financial"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["person_id"].as_str().unwrap(), person.id.to_string());
    assert_eq!(body["person_name"].as_str().unwrap(), person.name);
    assert_eq!(body["responsible"].as_str().unwrap(), "Anna Girken");
    assert_eq!(body["comment"].as_str().unwrap(), "Warm lead from the gala");
    assert!(body["contacted"].as_bool().unwrap());
    assert!(body["successful"].as_bool().unwrap());
    assert!(body["letter"].as_bool().unwrap());
    assert!(!body["meeting"].as_bool().unwrap());
    assert_eq!(body["priority"].as_str().unwrap(), "high");
    assert_eq!(body["collab_type"].as_str().unwrap(), "financial");
    assert_eq!(
        body["amount"].as_str().unwrap().parse::<f64>().unwrap(),
        2500.25
    );
}

#[tokio::test]
async fn test_create_collaboration_duplicate_pair() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;

    let response = app
        .server
        .post("/api/collaborations")
        .json(&json!({
            "company_id": link.company.id,
            "project_id": link.project.id
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Conflict");
    assert_eq!(
        body["existing_companies"][0].as_str().unwrap(),
        link.company.name
    );
}

#[tokio::test]
async fn test_create_collaboration_unknown_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;

    let response = app
        .server
        .post("/api/collaborations")
        .json(&json!({
            "company_id": company.id,
            "project_id": Uuid::new_v4()
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_collaboration_person_from_other_company() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let other_company = factory.create_company().await;
    let outsider = factory.create_person(other_company.id).await;
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/collaborations")
        .json(&json!({
            "company_id": company.id,
            "project_id": project.id,
            "person_id": outsider.id
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Validation error");
}

#[tokio::test]
async fn test_get_collaboration() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;

    let response = app
        .server
        .get(&format!("/api/collaborations/{}", link.collaboration.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["id"].as_str().unwrap(),
        link.collaboration.id.to_string()
    );
    assert_eq!(body["company_name"].as_str().unwrap(), link.company.name);
    assert_eq!(body["project_name"].as_str().unwrap(), link.project.name);
}

#[tokio::test]
async fn test_get_collaboration_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get(&format!("/api/collaborations/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_collaborations_by_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project_a = factory.create_project().await;
    let project_b = factory.create_project().await;
    let c1 = factory.create_company().await;
    let c2 = factory.create_company().await;
    let c3 = factory.create_company().await;

    factory.create_collaboration(c1.id, project_a.id).await;
    factory.create_collaboration(c2.id, project_a.id).await;
    factory.create_collaboration(c3.id, project_b.id).await;

    let response = app
        .server
        .get(&format!("/api/collaborations?project_id={}", project_a.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_i64().unwrap(), 2);
    // Rows come out with the display names already joined in
    assert!(body["data"][0]["company_name"].as_str().is_some());
    assert!(body["data"][0]["project_name"].as_str().is_some());
}

#[tokio::test]
async fn test_list_collaborations_by_company() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project_a = factory.create_project().await;
    let project_b = factory.create_project().await;
    let company = factory.create_company().await;
    let other = factory.create_company().await;

    factory.create_collaboration(company.id, project_a.id).await;
    factory.create_collaboration(company.id, project_b.id).await;
    factory.create_collaboration(other.id, project_a.id).await;

    let response = app
        .server
        .get(&format!("/api/collaborations?company_id={}", company.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_i64().unwrap(), 2);
}

#[tokio::test]
async fn test_list_collaborations_pagination() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    for _ in 0..3 {
        let company = factory.create_company().await;
        factory.create_collaboration(company.id, project.id).await;
    }

    let response = app
        .server
        .get(&format!(
            "/api/collaborations?project_id={}&limit=2&offset=0",
            project.id
        ))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_i64().unwrap(), 3);
    assert_eq!(body["limit"].as_i64().unwrap(), 2);
    assert_eq!(body["offset"].as_i64().unwrap(), 0);

    let response = app
        .server
        .get(&format!(
            "/api/collaborations?project_id={}&limit=2&offset=2",
            project.id
        ))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_collaboration_keeps_pair() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;

    // Same (company, project) pair must not trip the duplicate check
    let response = app
        .server
        .put(&format!("/api/collaborations/{}", link.collaboration.id))
        .json(&json!({
            "company_id": link.company.id,
            "project_id": link.project.id,
            "comment": "Second call scheduled",
            "contacted": true
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["comment"].as_str().unwrap(), "Second call scheduled");
    assert!(body["contacted"].as_bool().unwrap());
}

#[tokio::test]
async fn test_update_collaboration_replaces_omitted_fields() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let project = factory.create_project().await;
    let person = factory.create_person(company.id).await;
    let collab = factory
        .create_full_collaboration(company.id, project.id, person.id)
        .await;

    // Update is a full replace: fields missing from the payload reset
    let response = app
        .server
        .put(&format!("/api/collaborations/{}", collab.id))
        .json(&json!({
            "company_id": company.id,
            "project_id": project.id
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["person_id"].is_null());
    assert!(body["responsible"].is_null());
    assert!(body["amount"].is_null());
    assert!(body["successful"].is_null());
    assert!(!body["contacted"].as_bool().unwrap());
    assert_eq!(body["priority"].as_str().unwrap(), "low");
}

#[tokio::test]
async fn test_update_collaboration_to_taken_pair() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;
    let company_a = factory.create_company().await;
    let company_b = factory.create_company().await;
    factory.create_collaboration(company_a.id, project.id).await;
    let movable = factory.create_collaboration(company_b.id, project.id).await;

    let response = app
        .server
        .put(&format!("/api/collaborations/{}", movable.id))
        .json(&json!({
            "company_id": company_a.id,
            "project_id": project.id
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["existing_companies"][0].as_str().unwrap(),
        company_a.name
    );
}

#[tokio::test]
async fn test_update_collaboration_move_to_other_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;
    let other_project = factory.create_project().await;

    let response = app
        .server
        .put(&format!("/api/collaborations/{}", link.collaboration.id))
        .json(&json!({
            "company_id": link.company.id,
            "project_id": other_project.id
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["project_id"].as_str().unwrap(),
        other_project.id.to_string()
    );
    assert_eq!(body["project_name"].as_str().unwrap(), other_project.name);
}

#[tokio::test]
async fn test_update_collaboration_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let project = factory.create_project().await;

    let response = app
        .server
        .put(&format!("/api/collaborations/{}", Uuid::new_v4()))
        .json(&json!({
            "company_id": company.id,
            "project_id": project.id
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_collaboration() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;

    let response = app
        .server
        .delete(&format!("/api/collaborations/{}", link.collaboration.id))
        .await;

    response.assert_status(StatusCode::OK);

    // Verify it's deleted
    let get_response = app
        .server
        .get(&format!("/api/collaborations/{}", link.collaboration.id))
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_collaboration_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .delete(&format!("/api/collaborations/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_company_removes_its_collaborations() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;

    let response = app
        .server
        .delete(&format!("/api/companies/{}", link.company.id))
        .await;

    response.assert_status(StatusCode::OK);

    let get_response = app
        .server
        .get(&format!("/api/collaborations/{}", link.collaboration.id))
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_project_removes_its_collaborations() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let link = factory.create_linked().await;

    let response = app
        .server
        .delete(&format!("/api/projects/{}", link.project.id))
        .await;

    response.assert_status(StatusCode::OK);

    let get_response = app
        .server
        .get(&format!("/api/collaborations/{}", link.collaboration.id))
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_person_removes_their_collaborations() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let project = factory.create_project().await;
    let person = factory.create_person(company.id).await;
    let collab = factory
        .create_full_collaboration(company.id, project.id, person.id)
        .await;

    let response = app
        .server
        .delete(&format!("/api/people/{}", person.id))
        .await;

    response.assert_status(StatusCode::OK);

    let get_response = app
        .server
        .get(&format!("/api/collaborations/{}", collab.id))
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unique_index_rejects_duplicate_pair_directly() {
    // The index is the authoritative duplicate signal; a write that bypasses
    // the friendly pre-check must still come back as a conflict.
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let company = factory.create_company().await;
    let project = factory.create_project().await;

    let input = Factory::collaboration_input(company.id, project.id);
    CollaborationRepository::insert_one(&app.state.db, &input)
        .await
        .expect("first insert should succeed");

    let err = CollaborationRepository::insert_one(&app.state.db, &input)
        .await
        .expect_err("second insert should hit the unique index");
    assert!(matches!(err, AppError::Conflict(_)));
}
