//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every expected business failure (validation, missing item, duplicate name,
/// overdrawn stock) is a variant here; infrastructure failures are wrapped as
/// `Internal` at the storage boundary and never leak partial mutation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (missing/malformed/out-of-range input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record does not exist.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate item name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Requested consumption exceeds the available quantity.
    ///
    /// Carries the available amount and unit so callers can render a precise
    /// message.
    #[error("insufficient stock. Available: {available} {unit}")]
    InsufficientStock { available: f64, unit: String },

    /// Authorization failure at the domain boundary.
    #[error("unauthorized")]
    Unauthorized,

    /// Storage or infrastructure failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn insufficient_stock(available: f64, unit: impl Into<String>) -> Self {
        Self::InsufficientStock {
            available,
            unit: unit.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
