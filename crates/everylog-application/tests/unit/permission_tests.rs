//! Permission Resolver tests

use everylog_domain::error::Error;
use everylog_domain::value_objects::Credential;

use crate::test_utils::fixture;

#[test]
fn test_key_resolves_for_owner_only() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let p1 = fx.create_project(&alice, "web");
    let k1 = fx.issue_key(&alice, &p1);

    let grant = fx
        .permissions
        .resolve_grant(&alice, &Credential::ApiKey(k1.clone()))
        .unwrap();
    assert_eq!(grant.user_id, alice);
    assert_eq!(grant.project_id, p1);

    assert!(matches!(
        fx.permissions.resolve_grant(&bob, &Credential::ApiKey(k1)),
        Err(Error::Unauthorized)
    ));
}

#[test]
fn test_project_and_key_paths_agree() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let p1 = fx.create_project(&alice, "web");
    let k1 = fx.issue_key(&alice, &p1);

    let by_project = fx
        .permissions
        .resolve_grant(&alice, &Credential::Project(p1))
        .unwrap();
    let by_key = fx
        .permissions
        .resolve_grant(&alice, &Credential::ApiKey(k1))
        .unwrap();

    assert_eq!(by_project, by_key);
}

#[test]
fn test_rotation_retires_old_key() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let p1 = fx.create_project(&alice, "web");
    let k1 = fx.issue_key(&alice, &p1);
    let k2 = fx.issue_key(&alice, &p1);

    assert_ne!(k1, k2);
    assert_eq!(k2.len(), 32);
    assert!(matches!(
        fx.permissions.resolve_grant(&alice, &Credential::ApiKey(k1)),
        Err(Error::Storage { .. })
    ));
    assert!(
        fx.permissions
            .resolve_grant(&alice, &Credential::ApiKey(k2))
            .is_ok()
    );
    assert_eq!(fx.store.api_keys().len(), 1);
}

#[test]
fn test_missing_project_grant_is_storage_error() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let bob = fx.register("bob@example.com");
    let p1 = fx.create_project(&alice, "web");

    assert!(matches!(
        fx.permissions.resolve_grant(&bob, &Credential::Project(p1)),
        Err(Error::Storage { .. })
    ));
}

#[test]
fn test_unknown_key_is_storage_error() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");

    assert!(matches!(
        fx.permissions
            .resolve_grant(&alice, &Credential::ApiKey("deadbeef".to_string())),
        Err(Error::Storage { .. })
    ));
}
