//! Error Extension Tests

use everylog_domain::error::{Error, Result};
use everylog_infrastructure::error_ext::ErrorContext;
use std::io;

fn io_failure() -> std::result::Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[test]
fn test_config_context_keeps_source() {
    let result: Result<()> = io_failure().config_context("failed to read config");

    match result {
        Err(Error::Configuration { message, source }) => {
            assert!(message.contains("failed to read config"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_db_context_is_storage_and_hides_details() {
    let error = match io_failure().db_context("failed to query") {
        Err(e) => e,
        Ok(()) => panic!("Expected Storage error"),
    };

    assert!(matches!(error, Error::Storage { .. }));
    assert_eq!(error.public_message(), "Database error");
}

#[test]
fn test_encoding_context() {
    let result: Result<()> = io_failure().encoding_context("failed to sign token");

    assert!(matches!(result, Err(Error::Encoding { .. })));
}

#[test]
fn test_with_context_is_lazy_internal_error() {
    let ok: std::result::Result<u8, io::Error> = Ok(7);
    let value = ok
        .with_context(|| -> String { panic!("context built for a successful result") })
        .unwrap();
    assert_eq!(value, 7);

    match io_failure().with_context(|| format!("step {}", 3)) {
        Err(Error::Internal { message }) => assert!(message.starts_with("step 3: ")),
        other => panic!("Expected Internal error, got {other:?}"),
    }
}
