//! Composition root tests

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use everylog_application::NewUser;
use everylog_domain::constants::SESSION_TOKEN_LIFETIME_SECS;
use everylog_domain::error::Error;
use everylog_infrastructure::clock::ManualClock;
use everylog_infrastructure::config::{AppConfig, ConfigBuilder, DatabaseConfig};
use everylog_infrastructure::constants::JWT_DEFAULT_EXPIRATION_SECS;
use everylog_infrastructure::{init_app, init_app_with_store};
use everylog_providers::MemoryStore;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn memory_config() -> AppConfig {
    ConfigBuilder::new()
        .with_jwt_secret(SECRET)
        .with_database(DatabaseConfig::memory())
        .build()
}

#[test]
fn test_init_app_resolves_memory_provider() {
    let context = init_app(memory_config()).unwrap();

    assert_eq!(context.store().provider_name(), "memory");
    assert!(context.store().health_check().is_ok());
}

#[test]
fn test_init_app_rejects_unknown_provider() {
    let mut config = memory_config();
    config.database.provider = "cassandra".to_string();

    match init_app(config) {
        Err(Error::Configuration { message, .. }) => {
            assert!(message.contains("Unknown store provider 'cassandra'"));
        }
        Err(other) => panic!("Expected Configuration error, got {other:?}"),
        Ok(_) => panic!("Expected init_app to fail"),
    }
}

#[test]
fn test_init_app_rejects_invalid_config() {
    let config = ConfigBuilder::new()
        .with_database(DatabaseConfig::memory())
        .build();

    assert!(matches!(init_app(config), Err(Error::Configuration { .. })));
}

#[test]
fn test_wired_services_share_store_and_clock() {
    let store = MemoryStore::new();
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let context =
        init_app_with_store(memory_config(), Arc::new(store.clone()), clock.clone()).unwrap();

    let user_id = context
        .users()
        .create_user(&NewUser {
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: None,
            password: "hunter2".to_string(),
        })
        .unwrap();
    assert_eq!(store.user_count(), 1);

    let session = context.sessions().authenticate(&user_id, "hunter2").unwrap();
    assert_eq!(
        session.expires_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    );

    clock.advance(Duration::minutes(61));
    assert!(matches!(
        context.sessions().authorize(&user_id, &session.token),
        Err(Error::ExpiredToken)
    ));
}

#[test]
fn test_session_lifetime_follows_config() {
    assert_eq!(
        i64::try_from(JWT_DEFAULT_EXPIRATION_SECS).unwrap(),
        SESSION_TOKEN_LIFETIME_SECS
    );

    let store = MemoryStore::new();
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let mut config = memory_config();
    config.auth.jwt.expiration_secs = 120;
    let context = init_app_with_store(config, Arc::new(store), clock).unwrap();

    let user_id = context
        .users()
        .create_user(&NewUser {
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: None,
            password: "hunter2".to_string(),
        })
        .unwrap();
    let session = context.sessions().authenticate(&user_id, "hunter2").unwrap();

    assert_eq!(session.expires_at, start + Duration::minutes(2));
}
