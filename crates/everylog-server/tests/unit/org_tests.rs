//! Organization and org invite endpoint tests

use everylog_domain::entities::{Org, OrgInvite};
use rocket::http::Status;
use serde_json::json;

use crate::test_utils::{TestServer, error_message, session_header, test_server, user_header};

async fn list_orgs(server: &TestServer, user_id: &str, token: &str, query: &str) -> Vec<Org> {
    let response = server
        .client
        .get(format!("/org{query}"))
        .header(user_header(user_id))
        .header(session_header(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    response.into_json::<Vec<Org>>().await.unwrap()
}

#[rocket::async_test]
async fn test_orgs_are_listed_for_members_only() {
    let server = test_server().await;
    let (alice, alice_token) = server.signed_in("alice@example.com").await;
    let (bob, bob_token) = server.signed_in("bob@example.com").await;
    let acme = server.create_org(&alice, &alice_token, "acme").await;
    server.create_org(&alice, &alice_token, "initech").await;
    server.create_org(&bob, &bob_token, "globex").await;

    let alice_orgs = list_orgs(&server, &alice, &alice_token, "").await;
    assert_eq!(alice_orgs.len(), 2);
    assert!(alice_orgs.iter().all(|org| org.owner == alice));

    let filtered = list_orgs(&server, &alice, &alice_token, "?name=ac%25").await;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, acme);

    let bob_orgs = list_orgs(&server, &bob, &bob_token, "").await;
    assert_eq!(bob_orgs.len(), 1);
    assert_eq!(bob_orgs[0].name, "globex");
}

#[rocket::async_test]
async fn test_duplicate_org_name_per_owner() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;
    server.create_org(&alice, &token, "acme").await;

    let response = server
        .client
        .post("/org")
        .header(user_header(&alice))
        .header(session_header(&token))
        .json(&json!({ "name": "acme" }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(error_message(response).await, "org already exists");
}

#[rocket::async_test]
async fn test_org_invite_requires_membership() {
    let server = test_server().await;
    let (alice, alice_token) = server.signed_in("alice@example.com").await;
    let (bob, bob_token) = server.signed_in("bob@example.com").await;
    let (carol, carol_token) = server.signed_in("carol@example.com").await;
    let acme = server.create_org(&alice, &alice_token, "acme").await;

    let invited = server
        .client
        .post(format!("/org/{acme}/invite"))
        .header(user_header(&alice))
        .header(session_header(&alice_token))
        .json(&json!({ "to_user_id": bob }))
        .dispatch()
        .await;
    assert_eq!(invited.status(), Status::Ok);

    let outsider = server
        .client
        .post(format!("/org/{acme}/invite"))
        .header(user_header(&bob))
        .header(session_header(&bob_token))
        .json(&json!({ "to_user_id": carol }))
        .dispatch()
        .await;
    assert_eq!(outsider.status(), Status::Unauthorized);

    let response = server
        .client
        .get("/invite/org")
        .header(user_header(&bob))
        .header(session_header(&bob_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let invites = response.into_json::<Vec<OrgInvite>>().await.unwrap();
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0].org_id, acme);
    assert_eq!(invites[0].to_user_id, bob);

    let response = server
        .client
        .get("/invite/org")
        .header(user_header(&carol))
        .header(session_header(&carol_token))
        .dispatch()
        .await;
    let invites = response.into_json::<Vec<OrgInvite>>().await.unwrap();
    assert!(invites.is_empty());
}

#[rocket::async_test]
async fn test_org_invite_without_to_user_id() {
    let server = test_server().await;
    let (alice, token) = server.signed_in("alice@example.com").await;
    let acme = server.create_org(&alice, &token, "acme").await;

    let response = server
        .client
        .post(format!("/org/{acme}/invite"))
        .header(user_header(&alice))
        .header(session_header(&token))
        .json(&json!({}))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::UnprocessableEntity);
    assert_eq!(error_message(response).await, "to_user_id is required");
}
