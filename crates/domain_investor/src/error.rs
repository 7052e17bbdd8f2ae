//! Investor domain errors
//!
//! `ValidationError` is recoverable and meant to be shown to the client.
//! Everything else is an operational failure.

use thiserror::Error;

use core_kernel::{InvestorId, PortError};

/// One or more user-facing validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .errors.join("; "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    /// Creates a validation error with a single message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// Creates a validation error from collected messages
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Returns true if any message contains the given fragment
    pub fn mentions(&self, fragment: &str) -> bool {
        self.errors.iter().any(|e| e.contains(fragment))
    }
}

/// Errors that can occur in the investor domain
#[derive(Debug, Error)]
pub enum InvestorError {
    /// Submitted investor data failed validation
    #[error("Invalid investor data: {0}")]
    Validation(#[from] ValidationError),

    /// Investor with the given ID was not found
    #[error("Investor not found: {0}")]
    NotFound(InvestorId),

    /// The backing store failed
    #[error("Storage error: {0}")]
    Port(#[from] PortError),
}

impl InvestorError {
    /// Creates a Validation error with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        InvestorError::Validation(ValidationError::new(message))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, InvestorError::Validation(_))
    }
}
