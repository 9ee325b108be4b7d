use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::{MockDynamoResponses, TestConfig};

const TABLE: &str = "pet-hospital-doctors";

fn create_test_app(config: AppConfig) -> Router {
    doctor_routes(Arc::new(config))
}

fn stored_doctor(id: &str, hospital_id: &str) -> Value {
    let now = Utc::now();
    json!({
        "id": id,
        "firstName": "Alice",
        "lastName": "Reed",
        "specialization": "Surgery",
        "hospitalId": hospital_id,
        "email": null,
        "phone": "555-9999",
        "licenseNumber": "VET-1001",
        "createdAt": now,
        "updatedAt": now,
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_doctor_assigns_id_and_keeps_optional_fields_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.PutItem"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockDynamoResponses::put()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::for_mock_server(&mock_server.uri(), TABLE));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/doctors")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "Alice",
                        "lastName": "Reed",
                        "specialization": "Surgery",
                        "hospitalId": "h-1",
                        "licenseNumber": "VET-1001"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let doctor = body_json(response).await;
    assert!(Uuid::parse_str(doctor["id"].as_str().unwrap()).is_ok());
    assert_eq!(doctor["email"], Value::Null);
    assert_eq!(doctor["phone"], Value::Null);
    assert_eq!(doctor["createdAt"], doctor["updatedAt"]);
}

#[tokio::test]
async fn create_doctor_without_license_is_rejected() {
    let app = create_test_app(TestConfig::default().to_app_config());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/doctors")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "Alice",
                        "lastName": "Reed",
                        "specialization": "Surgery",
                        "hospitalId": "h-1"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "Missing required fields" }));
}

#[tokio::test]
async fn list_doctors_by_hospital_filters_by_scan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.Scan"))
        .and(body_partial_json(json!({
            "FilterExpression": "hospitalId = :hospitalId",
            "ExpressionAttributeValues": { ":hospitalId": { "S": "h-1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockDynamoResponses::scan(&[
            stored_doctor("d-1", "h-1"),
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::for_mock_server(&mock_server.uri(), TABLE));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/hospitals/h-1/doctors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doctors = body_json(response).await;
    assert_eq!(doctors.as_array().unwrap().len(), 1);
    assert_eq!(doctors[0]["hospitalId"], "h-1");
}

#[tokio::test]
async fn list_doctors_by_hospital_with_no_matches_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.Scan"))
        .and(body_partial_json(json!({
            "ExpressionAttributeValues": { ":hospitalId": { "S": "H1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockDynamoResponses::scan(&[])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::for_mock_server(&mock_server.uri(), TABLE));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/hospitals/H1/doctors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn update_doctor_merges_and_writes_conditionally() {
    let mock_server = MockServer::start().await;
    let existing = stored_doctor("d-1", "h-1");

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.GetItem"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockDynamoResponses::get(Some(&existing))))
        .mount(&mock_server)
        .await;

    let mut merged = existing.clone();
    merged["specialization"] = json!("Dermatology");
    merged["updatedAt"] = json!(Utc::now());

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.UpdateItem"))
        .and(body_partial_json(json!({
            "ConditionExpression": "updatedAt = :expectedUpdatedAt",
            "ExpressionAttributeValues": {
                ":specialization": { "S": "Dermatology" },
                ":firstName": { "S": "Alice" },
                ":licenseNumber": { "S": "VET-1001" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockDynamoResponses::update(&merged)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::for_mock_server(&mock_server.uri(), TABLE));
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/doctors/d-1")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "specialization": "Dermatology" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doctor = body_json(response).await;
    assert_eq!(doctor["specialization"], "Dermatology");
    assert_eq!(doctor["lastName"], "Reed");
}

#[tokio::test]
async fn delete_unknown_doctor_is_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.DeleteItem"))
        .and(body_partial_json(json!({ "Key": { "id": { "S": "unknown-id" } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockDynamoResponses::delete(None)))
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::for_mock_server(&mock_server.uri(), TABLE));
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/doctors/unknown-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Doctor not found" }));
}

#[tokio::test]
async fn get_doctor_maps_store_failure_to_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.GetItem"))
        .respond_with(ResponseTemplate::new(500).set_body_json(MockDynamoResponses::error(
            "InternalServerError",
            "boom",
        )))
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::for_mock_server(&mock_server.uri(), TABLE));
    let response = app
        .oneshot(Request::builder().uri("/doctors/d-1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Failed to fetch doctor" }));
}
