//! Status mapping and error body tests

use everylog_providers::StoreOperation;
use everylog_server::models::HealthResponse;
use rocket::http::{ContentType, Status};
use serde_json::json;

use crate::test_utils::{error_message, test_server, tracked_test_server};

#[rocket::async_test]
async fn test_health_reports_provider() {
    let server = tracked_test_server().await;

    let response = server.client.get("/health").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    let body = response.into_json::<HealthResponse>().await.unwrap();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.provider, "memory");
}

#[rocket::async_test]
async fn test_health_degraded_when_store_fails() {
    let server = test_server().await;
    server.store.fail_on(StoreOperation::HealthCheck);

    let response = server.client.get("/health").dispatch().await;

    assert_eq!(response.status(), Status::ServiceUnavailable);
    let body = response.into_json::<HealthResponse>().await.unwrap();
    assert_eq!(body.status, "degraded");
}

#[rocket::async_test]
async fn test_unknown_route_returns_json_404() {
    let server = test_server().await;

    let response = server.client.get("/table").dispatch().await;

    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(error_message(response).await, "Not found");
}

#[rocket::async_test]
async fn test_create_user_returns_id() {
    let server = test_server().await;

    let user_id = server.register("alice@example.com").await;

    assert!(!user_id.is_empty());
    assert_eq!(server.store.user_count(), 1);
}

#[rocket::async_test]
async fn test_duplicate_email_returns_409() {
    let server = test_server().await;
    server.register("alice@example.com").await;

    let response = server
        .client
        .post("/user")
        .json(&json!({
            "email": "alice@example.com",
            "first_name": "Other",
            "password": "pw",
        }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(error_message(response).await, "email already exists");
    assert_eq!(server.store.user_count(), 1);
}

#[rocket::async_test]
async fn test_missing_field_returns_422() {
    let server = test_server().await;

    let response = server
        .client
        .post("/user")
        .json(&json!({ "email": "alice@example.com", "first_name": "Alice" }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::UnprocessableEntity);
    assert_eq!(error_message(response).await, "password is required");
}

#[rocket::async_test]
async fn test_malformed_body_is_json_parsing_error() {
    let server = test_server().await;

    let response = server
        .client
        .post("/user")
        .header(ContentType::JSON)
        .body("{\"email\": ")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(error_message(response).await, "Json parsing error");
}

#[rocket::async_test]
async fn test_store_failure_hides_driver_text() {
    let server = test_server().await;
    server.store.fail_on(StoreOperation::CreateUser);

    let response = server
        .client
        .post("/user")
        .json(&json!({
            "email": "alice@example.com",
            "first_name": "Alice",
            "password": "pw",
        }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(error_message(response).await, "Database error");
    assert_eq!(server.store.user_count(), 0);
}
