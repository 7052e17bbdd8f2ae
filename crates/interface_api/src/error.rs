//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::{CoreError, PortError};
use domain_fund::FundError;
use domain_investor::InvestorError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },
}

impl ApiError {
    /// Creates a validation error from individual messages
    pub fn validation(details: Vec<String>) -> Self {
        ApiError::Validation {
            message: details.join("; "),
            details,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None),
            ApiError::Configuration(msg) => {
                tracing::error!(error = %msg, "configuration error while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", msg, None)
            }
            ApiError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "validation_error", message, Some(details))
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Conflict { message } => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InvestorError> for ApiError {
    fn from(err: InvestorError) -> Self {
        match err {
            InvestorError::Validation(e) => ApiError::validation(e.errors),
            InvestorError::NotFound(id) => ApiError::NotFound(format!("Investor not found: {}", id)),
            InvestorError::Port(e) => e.into(),
        }
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        match err {
            FundError::Port(e) => e.into(),
            FundError::NavNotFound(msg) => ApiError::NotFound(msg),
            FundError::InsufficientUnits(msg) => ApiError::Conflict(msg),
            other if other.is_client_error() => ApiError::BadRequest(other.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration(msg) => ApiError::Configuration(msg),
            CoreError::Validation(msg) => ApiError::validation(vec![msg]),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::Temporal(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();
        ApiError::validation(details)
    }
}
