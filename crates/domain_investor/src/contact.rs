//! Contact field rules
//!
//! Phone numbers are stored in one canonical local mobile format. Values
//! coming out of spreadsheet imports (`912345678.0`, `9.12345678E8`) or typed
//! with separators (`091 234 5678`, `+84912345678`) are rejected instead of
//! being repaired, so the caller sees exactly what was wrong.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a canonical mobile number
pub const PHONE_LENGTH: usize = 10;

/// Digits allowed right after the leading `0`
pub const MOBILE_PREFIX_DIGITS: &[char] = &['3', '5', '7', '8', '9'];

static MOBILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0[35789][0-9]{8}$").expect("mobile pattern is a valid regex")
});

/// A validated mobile phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_phone(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

/// Validates and normalizes a phone number
///
/// Surrounding whitespace is trimmed. The rest must be exactly ten ASCII
/// digits starting with `0` and a valid mobile prefix digit.
///
/// # Errors
///
/// Returns a `ValidationError` with a message naming the first problem found.
///
/// # Example
///
/// ```rust
/// use domain_investor::contact::validate_phone;
///
/// let phone = validate_phone(" 0912345678 ").unwrap();
/// assert_eq!(phone.as_str(), "0912345678");
/// ```
pub fn validate_phone(raw: &str) -> Result<PhoneNumber, ValidationError> {
    let candidate = raw.trim();

    if MOBILE_PATTERN.is_match(candidate) {
        return Ok(PhoneNumber(candidate.to_string()));
    }

    Err(ValidationError::new(describe_phone_problem(candidate)))
}

fn describe_phone_problem(candidate: &str) -> String {
    if candidate.is_empty() {
        return "Phone number is required".to_string();
    }
    if !candidate.chars().all(|c| c.is_ascii_digit()) {
        return format!("Phone number must contain digits only: '{}'", candidate);
    }
    if candidate.len() != PHONE_LENGTH {
        return format!(
            "Phone number must be {} digits, got {}",
            PHONE_LENGTH,
            candidate.len()
        );
    }
    format!(
        "Phone number must start with 0 followed by one of {}",
        MOBILE_PREFIX_DIGITS.iter().collect::<String>()
    )
}

/// Validates and normalizes an email address
///
/// Trims whitespace and lowercases the domain part. Only the overall shape is
/// checked: one `@`, a non-empty local part, and a dotted domain.
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let candidate = raw.trim();
    let invalid = || ValidationError::new(format!("Invalid email format: {}", candidate));

    if candidate.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = candidate.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(format!("{}@{}", local, domain.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_mobile_numbers() {
        for phone in ["0912345678", "0387654321", "0512345678", "0701234567", "0861234567"] {
            assert!(validate_phone(phone).is_ok(), "{} should be accepted", phone);
        }
    }

    #[test]
    fn test_spreadsheet_artifacts_rejected() {
        assert!(validate_phone("912345678.0").is_err());
        assert!(validate_phone("9.12345678E8").is_err());
        assert!(validate_phone("912345678").is_err());
    }

    #[test]
    fn test_separators_rejected() {
        let err = validate_phone("091 234 5678").unwrap_err();
        assert!(err.mentions("digits only"));
        assert!(validate_phone("091-234-5678").is_err());
        assert!(validate_phone("+84912345678").is_err());
    }

    #[test]
    fn test_problem_messages() {
        assert!(validate_phone("").unwrap_err().mentions("required"));
        assert!(validate_phone("abc123").unwrap_err().mentions("digits only"));
        assert!(validate_phone("091234567").unwrap_err().mentions("10 digits"));
        assert!(validate_phone("0212345678").unwrap_err().mentions("start with 0"));
        assert!(validate_phone("1912345678").unwrap_err().mentions("start with 0"));
    }

    #[test]
    fn test_phone_serde_validates() {
        let phone: PhoneNumber = serde_json::from_str("\"0912345678\"").unwrap();
        assert_eq!(phone.as_str(), "0912345678");
        assert!(serde_json::from_str::<PhoneNumber>("\"12345\"").is_err());
    }

    #[test]
    fn test_email() {
        assert_eq!(validate_email(" An@Example.COM ").unwrap(), "An@example.com");
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("a@@example.com").is_err());
    }
}
