//! Fund domain errors

use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    #[error("NAV not found: {0}")]
    NavNotFound(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Insufficient units: {0}")]
    InsufficientUnits(String),

    #[error("Timestamp error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Storage error: {0}")]
    Port(#[from] PortError),
}

impl FundError {
    /// Returns true for errors caused by caller input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FundError::InvalidTransaction(_) | FundError::InvalidQuery(_) | FundError::Temporal(_)
        )
    }
}
