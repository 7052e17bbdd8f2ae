//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Investor not found");

    match error {
        CoreError::NotFound(msg) => assert_eq!(msg, "Investor not found"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_core_error_from_temporal_error() {
    let temporal = TemporalError::InvalidTimestamp("soon".to_string());
    let core_error: CoreError = temporal.into();

    assert!(matches!(core_error, CoreError::Temporal(_)));
    assert!(!core_error.is_fatal());
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}

#[test]
fn test_core_error_configuration_is_fatal() {
    let error = CoreError::configuration("Missing config");

    assert!(error.is_fatal());
    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing config"),
        _ => panic!("Expected Configuration error"),
    }
}
