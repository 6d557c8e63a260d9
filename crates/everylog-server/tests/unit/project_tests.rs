//! Project, API key, log and project invite endpoint tests

use everylog_domain::entities::{LogRecord, ProjectInvite};
use rocket::http::Status;
use rocket::local::asynchronous::LocalResponse;
use serde_json::json;

use crate::test_utils::{
    TestServer, api_key_header, error_message, session_header, test_server, user_header,
};

async fn post_log<'c>(
    server: &'c TestServer,
    user_id: &str,
    key: &str,
    project_id: &str,
    level_id: i32,
) -> LocalResponse<'c> {
    server
        .client
        .post("/log")
        .header(user_header(user_id))
        .header(api_key_header(key))
        .json(&json!({
            "project_id": project_id,
            "level_id": level_id,
            "message": "disk almost full",
        }))
        .dispatch()
        .await
}

async fn list_logs(server: &TestServer, user_id: &str, token: &str, query: &str) -> Vec<LogRecord> {
    let response = server
        .client
        .get(format!("/log{query}"))
        .header(user_header(user_id))
        .header(session_header(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    response.into_json::<Vec<LogRecord>>().await.unwrap()
}

#[rocket::async_test]
async fn test_key_only_works_for_its_owner() {
    let server = test_server().await;
    let (alice, alice_token) = server.signed_in("alice@example.com").await;
    let (bob, bob_token) = server.signed_in("bob@example.com").await;
    let p1 = server.create_project(&alice, &alice_token, "web").await;
    let k1 = server.issue_key(&alice, &alice_token, &p1).await;

    let accepted = post_log(&server, &alice, &k1, &p1, 3).await;
    assert_eq!(accepted.status(), Status::Ok);

    let rejected = post_log(&server, &bob, &k1, &p1, 3).await;
    assert_eq!(rejected.status(), Status::Unauthorized);
    assert_eq!(error_message(rejected).await, "Unauthorized");

    let alice_logs = list_logs(&server, &alice, &alice_token, "").await;
    assert_eq!(alice_logs.len(), 1);
    assert_eq!(alice_logs[0].project_id, p1);
    assert_eq!(alice_logs[0].message, "disk almost full");
    assert!(list_logs(&server, &bob, &bob_token, "").await.is_empty());
    assert_eq!(server.store.log_count(), 1);
}

#[rocket::async_test]
async fn test_key_is_bound_to_its_project() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;
    let p1 = server.create_project(&alice, &token, "web").await;
    let p2 = server.create_project(&alice, &token, "worker").await;
    let k1 = server.issue_key(&alice, &token, &p1).await;

    let response = post_log(&server, &alice, &k1, &p2, 3).await;

    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(server.store.log_count(), 0);
}

#[rocket::async_test]
async fn test_rotated_key_stops_resolving() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;
    let p1 = server.create_project(&alice, &token, "web").await;
    let k1 = server.issue_key(&alice, &token, &p1).await;
    let k2 = server.issue_key(&alice, &token, &p1).await;
    assert_ne!(k1, k2);

    let old = post_log(&server, &alice, &k1, &p1, 1).await;
    assert_eq!(old.status(), Status::InternalServerError);
    assert_eq!(error_message(old).await, "Database error");

    let new = post_log(&server, &alice, &k2, &p1, 1).await;
    assert_eq!(new.status(), Status::Ok);
    assert_eq!(server.store.api_keys().len(), 1);
}

#[rocket::async_test]
async fn test_duplicate_project_returns_409() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;
    server.create_project(&alice, &token, "web").await;

    let response = server
        .client
        .post("/project")
        .header(user_header(&alice))
        .header(session_header(&token))
        .json(&json!({ "name": "web", "description": "again" }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(error_message(response).await, "project already exists");
    assert_eq!(server.store.projects().len(), 1);
}

#[rocket::async_test]
async fn test_key_for_foreign_project_is_unauthorized() {
    let server = test_server().await;
    let (alice, alice_token) = server.signed_in("alice@example.com").await;
    let (bob, bob_token) = server.signed_in("bob@example.com").await;
    let p1 = server.create_project(&alice, &alice_token, "web").await;

    let response = server
        .client
        .post(format!("/project/{p1}/key"))
        .header(user_header(&bob))
        .header(session_header(&bob_token))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Unauthorized);
    assert!(server.store.api_keys().is_empty());
}

#[rocket::async_test]
async fn test_log_without_api_key_header() {
    let server = test_server().await;
    let (alice, _) = server.signed_in("alice@example.com").await;

    let response = server
        .client
        .post("/log")
        .header(user_header(&alice))
        .json(&json!({ "project_id": "p1", "level_id": 1, "message": "hi" }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(error_message(response).await, "Api key required");
}

#[rocket::async_test]
async fn test_list_logs_filters() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;
    let p1 = server.create_project(&alice, &token, "web").await;
    let k1 = server.issue_key(&alice, &token, &p1).await;
    for level in [1, 3, 3] {
        let response = post_log(&server, &alice, &k1, &p1, level).await;
        assert_eq!(response.status(), Status::Ok);
    }

    assert_eq!(list_logs(&server, &alice, &token, "?level_id=3").await.len(), 2);
    assert_eq!(
        list_logs(&server, &alice, &token, &format!("?project_id={p1}&level_id=1"))
            .await
            .len(),
        1
    );
    assert!(
        list_logs(&server, &alice, &token, "?from=2030-01-01T00:00:00Z")
            .await
            .is_empty()
    );
}

#[rocket::async_test]
async fn test_list_logs_bad_timestamp() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;

    let response = server
        .client
        .get("/log?from=yesterday")
        .header(user_header(&alice))
        .header(session_header(&token))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(error_message(response).await, "Json parsing error");
}

#[rocket::async_test]
async fn test_project_invite_with_api_key() {
    let server = test_server().await;
    let (alice, alice_token) = server.signed_in("alice@example.com").await;
    let (bob, bob_token) = server.signed_in("bob@example.com").await;
    let p1 = server.create_project(&alice, &alice_token, "web").await;
    let k1 = server.issue_key(&alice, &alice_token, &p1).await;

    let invite = || {
        server
            .client
            .post(format!("/project/{p1}/invite"))
            .header(user_header(&alice))
            .header(api_key_header(&k1))
            .json(&json!({ "to_user_id": bob }))
    };

    assert_eq!(invite().dispatch().await.status(), Status::Ok);

    let duplicate = invite().dispatch().await;
    assert_eq!(duplicate.status(), Status::Conflict);
    assert_eq!(
        error_message(duplicate).await,
        format!("invite from {alice} to {bob} for project {p1} already exists")
    );

    let response = server
        .client
        .get("/invite/project")
        .header(user_header(&bob))
        .header(session_header(&bob_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let invites = response.into_json::<Vec<ProjectInvite>>().await.unwrap();
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0].from_user_id, alice);
    assert_eq!(invites[0].status, "pending");
}
