//! Session Token Authority tests

use chrono::Duration;
use everylog_domain::error::Error;
use everylog_providers::StoreOperation;

use crate::test_utils::{PASSWORD, fixture, sessions_with_secret, start_time};

#[test]
fn test_authenticate_then_authorize() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");

    let session = fx.sessions.authenticate(&alice, PASSWORD).unwrap();
    assert_eq!(session.expires_at, start_time() + Duration::minutes(60));
    assert_eq!(fx.store.session_token(&alice), Some(session.token.clone()));

    let grant = fx.sessions.authorize(&alice, &session.token).unwrap();
    assert_eq!(grant.user_id, alice);
    assert_eq!(grant.expires_at, session.expires_at);
}

#[test]
fn test_token_expires_at_sixty_minutes() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let session = fx.sessions.authenticate(&alice, PASSWORD).unwrap();

    fx.clock.advance(Duration::minutes(59));
    assert!(fx.sessions.authorize(&alice, &session.token).is_ok());

    fx.clock.advance(Duration::minutes(1));
    assert!(matches!(
        fx.sessions.authorize(&alice, &session.token),
        Err(Error::ExpiredToken)
    ));

    fx.clock.advance(Duration::minutes(1));
    assert!(matches!(
        fx.sessions.authorize(&alice, &session.token),
        Err(Error::ExpiredToken)
    ));
}

#[test]
fn test_second_login_invalidates_first() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let first = fx.sessions.authenticate(&alice, PASSWORD).unwrap();
    let second = fx.sessions.authenticate(&alice, PASSWORD).unwrap();

    assert_ne!(first.token, second.token);

    assert!(matches!(
        fx.sessions.authorize(&alice, &first.token),
        Err(Error::Unauthorized)
    ));
    assert!(fx.sessions.authorize(&alice, &second.token).is_ok());
}

#[test]
fn test_wrong_password_issues_nothing() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");

    assert!(matches!(
        fx.sessions.authenticate(&alice, "wrong"),
        Err(Error::Unauthorized)
    ));
    assert_eq!(fx.store.session_token(&alice), None);
}

#[test]
fn test_unknown_user_is_storage_error() {
    let fx = fixture();

    assert!(matches!(
        fx.sessions.authenticate("ghost", PASSWORD),
        Err(Error::Storage { .. })
    ));
}

#[test]
fn test_authorize_without_session() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");

    assert!(matches!(
        fx.sessions.authorize(&alice, "anything"),
        Err(Error::Unauthorized)
    ));
    assert!(matches!(
        fx.sessions.authorize(&alice, "   "),
        Err(Error::MissingCredential { .. })
    ));
    assert!(matches!(
        fx.sessions.authorize("", "anything"),
        Err(Error::MissingCredential { .. })
    ));
}

#[test]
fn test_token_signed_with_other_secret_is_invalid() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let other = sessions_with_secret(
        &fx.orchestrator,
        &fx.clock,
        "another-secret-of-at-least-32-chars!",
    );
    let session = other.authenticate(&alice, PASSWORD).unwrap();

    assert!(matches!(
        fx.sessions.authorize(&alice, &session.token),
        Err(Error::InvalidToken)
    ));
}

#[test]
fn test_prefixed_token_is_accepted() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let session = fx.sessions.authenticate(&alice, PASSWORD).unwrap();

    assert!(
        fx.sessions
            .authorize(&alice, &format!("Bearer: {}", session.token))
            .is_ok()
    );
}

#[test]
fn test_failed_token_write_rolls_back() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    let first = fx.sessions.authenticate(&alice, PASSWORD).unwrap();
    fx.store.fail_on(StoreOperation::StoreSessionToken);

    assert!(matches!(
        fx.sessions.authenticate(&alice, PASSWORD),
        Err(Error::Storage { .. })
    ));
    assert_eq!(fx.store.session_token(&alice), Some(first.token.clone()));
    assert!(fx.sessions.authorize(&alice, &first.token).is_ok());
}

#[test]
fn test_failed_commit_returns_no_token() {
    let fx = fixture();
    let alice = fx.register("alice@example.com");
    fx.store.fail_on(StoreOperation::Commit);

    assert!(matches!(
        fx.sessions.authenticate(&alice, PASSWORD),
        Err(Error::Storage { .. })
    ));
    assert_eq!(fx.store.session_token(&alice), None);
}
