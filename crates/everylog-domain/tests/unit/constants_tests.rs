//! Unit tests for domain constants

use everylog_domain::constants::*;

#[test]
fn test_session_lifetime_is_one_hour() {
    assert_eq!(SESSION_TOKEN_LIFETIME_SECS, 3600);
}

#[test]
fn test_api_key_length_matches_hex_of_bytes() {
    assert_eq!(API_KEY_LENGTH, 32);
    assert_eq!(API_KEY_LENGTH, API_KEY_BYTES * 2);
}

#[test]
fn test_org_owner_level() {
    assert_eq!(ORG_OWNER_LEVEL, 500);
}
