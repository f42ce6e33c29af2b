//! Error types for the kantor service.

use crate::domain::{CurrencyCode, TradeSide};
use crate::ports::RateError;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Currency code \"{0}\" is not supported")]
    UnknownCurrency(String),

    #[error("{} not supported for {}", .side.upper(), .code)]
    UnsupportedOperation { code: CurrencyCode, side: TradeSide },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid mid rate: {0}")]
    InvalidRate(f64),

    #[error("{0}")]
    InvalidArgument(String),
}

/// Repository-level errors (history store failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Storage error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        RepoError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownCurrency(_) => AppError::NotFound(err.to_string()),
            DomainError::InvalidRate(_) => AppError::Internal(err.to_string()),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::NotFound(msg) => AppError::NotFound(msg),
            e => AppError::Internal(e.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}
