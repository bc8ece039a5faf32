//! Shared primitives for all Rust crates in Wishboard.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Wishboard crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The persistent store is unreachable or rejected the operation.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
