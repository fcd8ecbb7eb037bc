//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (record validation, illegal
/// view transitions). Loading/IO failures belong to the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a malformed product record).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = DomainError::validation("price missing");
        assert_eq!(err.to_string(), "validation failed: price missing");

        let err = DomainError::invariant("error state is terminal");
        assert_eq!(err.to_string(), "invariant violated: error state is terminal");
    }

    #[test]
    fn is_validation_distinguishes_variants() {
        assert!(DomainError::validation("x").is_validation());
        assert!(!DomainError::invariant("x").is_validation());
    }
}
