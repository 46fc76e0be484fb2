//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An order was constructed without any line items.
    #[error("empty order line items")]
    EmptyLineItems,

    /// The line items held by an order disagree with an independently fetched count.
    #[error("actual items do not match (expected {expected}, held {actual})")]
    LineItemCountMismatch { expected: usize, actual: usize },

    /// A status change was attempted on an order that already reached a terminal state.
    #[error("cannot change status once completed ({from} -> {to})")]
    IllegalStatusTransition {
        from: &'static str,
        to: &'static str,
    },

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_cause() {
        assert_eq!(DomainError::EmptyLineItems.to_string(), "empty order line items");

        let err = DomainError::LineItemCountMismatch {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "actual items do not match (expected 1, held 2)"
        );

        let err = DomainError::IllegalStatusTransition {
            from: "COMPLETION",
            to: "MEAL",
        };
        assert!(err.to_string().starts_with("cannot change status once completed"));
    }
}
