//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from API/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A coordinate or span was NaN or infinite
    #[error("invalid region: {0} must be finite")]
    NonFinite(&'static str),

    /// A latitude or longitude span was negative
    #[error("invalid region: {0} must not be negative")]
    NegativeSpan(&'static str),
}
