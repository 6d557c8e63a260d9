//! Use case tests: compound writes, scoping and listings

use everylog_application::{NewInvite, NewLogRecord, NewOrg, NewProject, NewUser};
use everylog_domain::error::Error;
use everylog_domain::value_objects::{InviteFilter, LogFilter, OrgFilter};
use everylog_providers::StoreOperation;

use crate::test_utils::{Fixture, PASSWORD, fixture};

fn record(project_id: &str, level_id: i32) -> NewLogRecord {
    NewLogRecord {
        project_id: project_id.to_string(),
        level_id,
        process_id: Some("worker-1".to_string()),
        message: "queue drained".to_string(),
        traceback: None,
        org_id: None,
    }
}

fn org(fx: &Fixture, user_id: &str, name: &str) -> String {
    fx.orgs
        .create_org(
            user_id,
            &NewOrg {
                name: name.to_string(),
                description: None,
                location_id: None,
            },
        )
        .unwrap()
        .id
}

#[test]
fn test_duplicate_email_leaves_one_user() {
    let fx = fixture();
    fx.register("alice@example.com");

    let result = fx.users.create_user(&NewUser {
        email: "alice@example.com".to_string(),
        first_name: "Impostor".to_string(),
        last_name: None,
        password: PASSWORD.to_string(),
    });

    match result {
        Err(Error::AlreadyExists { resource }) => assert_eq!(resource, "email"),
        other => panic!("Expected AlreadyExists, got {other:?}"),
    }
    assert_eq!(fx.store.user_count(), 1);
}

#[test]
fn test_empty_password_is_missing_field() {
    let fx = fixture();

    let result = fx.users.create_user(&NewUser {
        email: "alice@example.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: None,
        password: String::new(),
    });

    match result {
        Err(Error::MissingRequiredField { field }) => assert_eq!(field, "password"),
        other => panic!("Expected MissingRequiredField, got {other:?}"),
    }
}

#[test]
fn test_duplicate_project_leaves_one_row() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    fx.create_project(&alice, "web");

    let result = fx.projects.create_project(
        &alice,
        &NewProject {
            name: "web".to_string(),
            description: Some("again".to_string()),
        },
    );

    match result {
        Err(Error::AlreadyExists { resource }) => assert_eq!(resource, "project"),
        other => panic!("Expected AlreadyExists, got {other:?}"),
    }
    assert_eq!(fx.store.projects().len(), 1);
}

#[test]
fn test_failed_grant_write_discards_project() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    fx.store.fail_on(StoreOperation::CreatePermittedProject);

    let result = fx.projects.create_project(
        &alice,
        &NewProject {
            name: "web".to_string(),
            description: None,
        },
    );

    assert!(matches!(result, Err(Error::Storage { .. })));
    assert!(fx.store.projects().is_empty());
}

#[test]
fn test_key_issuance_requires_grant() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let p1 = fx.create_project(&alice, "web");

    assert!(matches!(
        fx.projects.issue_api_key(&bob, &p1),
        Err(Error::Unauthorized)
    ));
    assert!(fx.store.api_keys().is_empty());
}

#[test]
fn test_log_write_and_listing_are_scoped() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let p1 = fx.create_project(&alice, "web");
    let p2 = fx.create_project(&alice, "worker");
    let k1 = fx.issue_key(&alice, &p1);

    fx.logs.create_log(&alice, &k1, &record(&p1, 1)).unwrap();
    fx.logs.create_log(&alice, &k1, &record(&p1, 4)).unwrap();

    assert!(matches!(
        fx.logs.create_log(&alice, &k1, &record(&p2, 1)),
        Err(Error::Unauthorized)
    ));
    assert!(matches!(
        fx.logs.create_log(&bob, &k1, &record(&p1, 1)),
        Err(Error::Unauthorized)
    ));
    assert!(matches!(
        fx.logs.create_log(&alice, "", &record(&p1, 1)),
        Err(Error::MissingCredential { .. })
    ));

    let all = fx.logs.list_logs(&alice, &LogFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
    let errors = fx
        .logs
        .list_logs(
            &alice,
            &LogFilter {
                level_id: Some(4),
                ..LogFilter::default()
            },
        )
        .unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level_id, 4);
    assert!(fx.logs.list_logs(&bob, &LogFilter::default()).unwrap().is_empty());
}

#[test]
fn test_org_owner_membership_and_listing() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let acme = org(&fx, &alice, "acme");
    org(&fx, &bob, "globex");

    let orgs = fx.orgs.list_orgs(&alice, &OrgFilter::default()).unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].id, acme);

    let by_name = fx
        .orgs
        .list_orgs(
            &alice,
            &OrgFilter {
                name: Some("glo%".to_string()),
                ..OrgFilter::default()
            },
        )
        .unwrap();
    assert!(by_name.is_empty());
}

#[test]
fn test_invites_listed_for_both_participants() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let carol = fx.register("carol@example.com");
    let acme = org(&fx, &alice, "acme");
    let p1 = fx.create_project(&alice, "web");
    let k1 = fx.issue_key(&alice, &p1);

    let to_bob = NewInvite {
        to_user_id: bob.clone(),
        target_id: acme.clone(),
    };
    fx.invites.create_org_invite(&alice, &to_bob).unwrap();
    assert!(matches!(
        fx.invites.create_org_invite(&alice, &to_bob),
        Err(Error::AlreadyExists { .. })
    ));
    assert!(matches!(
        fx.invites.create_org_invite(
            &bob,
            &NewInvite {
                to_user_id: carol.clone(),
                target_id: acme.clone(),
            }
        ),
        Err(Error::Unauthorized)
    ));

    fx.invites
        .create_project_invite(
            &alice,
            &k1,
            &NewInvite {
                to_user_id: carol.clone(),
                target_id: p1.clone(),
            },
        )
        .unwrap();

    let sent = fx
        .invites
        .list_org_invites(&alice, &InviteFilter::default())
        .unwrap();
    let received = fx
        .invites
        .list_org_invites(&bob, &InviteFilter::default())
        .unwrap();
    assert_eq!(sent, received);
    assert_eq!(sent.len(), 1);
    assert!(
        fx.invites
            .list_org_invites(&carol, &InviteFilter::default())
            .unwrap()
            .is_empty()
    );

    let project_invites = fx
        .invites
        .list_project_invites(
            &carol,
            &InviteFilter {
                target_id: Some(p1),
                status: Some("pending".to_string()),
                ..InviteFilter::default()
            },
        )
        .unwrap();
    assert_eq!(project_invites.len(), 1);
    assert_eq!(project_invites[0].from_user_id, alice);
}

#[test]
fn test_alice_bob_end_to_end() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let session = fx.sessions.authenticate(&alice, PASSWORD).unwrap();
    fx.sessions.authorize(&alice, &session.token).unwrap();

    let p1 = fx.create_project(&alice, "p1");
    let k1 = fx.issue_key(&alice, &p1);

    let written = fx.logs.create_log(&alice, &k1, &record(&p1, 2)).unwrap();
    assert_eq!(written.user_id, alice);
    assert_eq!(written.project_id, p1);
    assert!(matches!(
        fx.logs.create_log(&bob, &k1, &record(&p1, 2)),
        Err(Error::Unauthorized)
    ));
    assert_eq!(fx.store.log_count(), 1);
}
