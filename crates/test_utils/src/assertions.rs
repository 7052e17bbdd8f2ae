//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use core_kernel::CanonicalZone;
use domain_investor::InvestorError;

/// Asserts that an investor operation failed validation with a message
/// containing `fragment`
///
/// # Panics
///
/// Panics if the result is Ok, a different error, or no message matches
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, InvestorError>, fragment: &str) {
    match result {
        Err(InvestorError::Validation(e)) => assert!(
            e.mentions(fragment),
            "Expected a validation message containing '{}', got {:?}",
            fragment,
            e.errors
        ),
        other => panic!("Expected validation error containing '{}', got {:?}", fragment, other),
    }
}

/// Asserts that a normalized timestamp shows the given wall clock in the zone
pub fn assert_wall_clock(actual: &DateTime<Tz>, expected: NaiveDateTime, zone: &CanonicalZone) {
    assert_eq!(
        actual.timezone(),
        zone.tz(),
        "Expected timestamp in {}, got {}",
        zone,
        actual.timezone()
    );
    assert_eq!(
        actual.naive_local(),
        expected,
        "Wall clock mismatch: actual={}, expected={}",
        actual.naive_local(),
        expected
    );
}

/// Asserts that two timestamps denote the same instant
pub fn assert_same_instant<A: TimeZone, B: TimeZone>(actual: &DateTime<A>, expected: &DateTime<B>) {
    assert_eq!(
        actual.timestamp_nanos_opt(),
        expected.timestamp_nanos_opt(),
        "Instants differ: actual={:?}, expected={:?}",
        actual.naive_utc(),
        expected.naive_utc()
    );
}
