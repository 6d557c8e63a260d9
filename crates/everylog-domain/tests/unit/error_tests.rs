//! Unit tests for domain error types

use everylog_domain::Error;
use everylog_domain::ports::StoreError;

#[test]
fn test_already_exists_message() {
    let error = Error::already_exists("project");
    assert_eq!(error.to_string(), "project already exists");
    match error {
        Error::AlreadyExists { resource } => assert_eq!(resource, "project"),
        _ => panic!("Expected AlreadyExists error"),
    }
}

#[test]
fn test_missing_field_message() {
    let error = Error::missing_field("name");
    assert_eq!(error.to_string(), "name is required");
}

#[test]
fn test_missing_credential_message() {
    let error = Error::missing_credential("User id");
    assert_eq!(error.to_string(), "User id required");
    assert!(error.is_auth_failure());
}

#[test]
fn test_token_errors_are_auth_failures() {
    assert!(Error::Unauthorized.is_auth_failure());
    assert!(Error::ExpiredToken.is_auth_failure());
    assert!(Error::InvalidToken.is_auth_failure());
    assert!(!Error::storage("down").is_auth_failure());
    assert!(!Error::already_exists("org").is_auth_failure());
}

#[test]
fn test_storage_error_keeps_source() {
    let source = StoreError::backend("connection reset");
    let error = Error::storage_with_source("failed to read grant", source);
    match &error {
        Error::Storage { message, source } => {
            assert_eq!(message, "failed to read grant");
            assert!(source.is_some());
        }
        _ => panic!("Expected Storage error"),
    }
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_public_message_hides_storage_details() {
    let error = Error::storage("relation \"api_key\" does not exist");
    assert_eq!(error.public_message(), "Database error");

    let error = Error::configuration("JWT secret missing");
    assert_eq!(error.public_message(), "Internal server error");

    assert_eq!(Error::ExpiredToken.public_message(), "Expired token");
}

#[test]
fn test_store_error_constructors() {
    match StoreError::unique("project_user_id_name_key") {
        StoreError::UniqueViolation { constraint } => {
            assert_eq!(constraint, "project_user_id_name_key");
        }
        _ => panic!("Expected UniqueViolation"),
    }
    assert_eq!(StoreError::not_found("api key").to_string(), "api key not found");
}
