//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable by the caller: an operation that returns one
/// of these has left products and the movement log untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed constructor input (empty required field, non-positive amount, unknown kind).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A product with the same code is already registered.
    #[error("product with code '{code}' already exists")]
    DuplicateProduct { code: String },

    /// No product is registered under this code.
    #[error("product with code '{code}' not found")]
    ProductNotFound { code: String },

    /// An outbound adjustment would take stock below zero.
    #[error("insufficient stock to remove {requested} units of product '{product}'")]
    InsufficientStock { product: String, requested: i64 },

    /// An inbound adjustment would take stock above the product's ceiling.
    #[error("maximum stock of {max_capacity} for product '{product}' would be exceeded")]
    CapacityExceeded { product: String, max_capacity: i64 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_product(code: impl Into<String>) -> Self {
        Self::DuplicateProduct { code: code.into() }
    }

    pub fn product_not_found(code: impl Into<String>) -> Self {
        Self::ProductNotFound { code: code.into() }
    }
}
