//! Constraint error types.

use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur during constraint checking.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Unknown method: {type_name}.{method}")]
    UnknownMethod { type_name: String, method: String },

    #[error("Expected {expected} argument(s) for {type_name}.{method}, got {actual}")]
    ArityMismatch {
        type_name: String,
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid arguments for rule '{rule}': {message}")]
    InvalidArguments { rule: String, message: String },
}

impl ConstraintError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn unknown_method(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    pub fn invalid_arguments(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Errors raised when the checker is wired against an incomplete rule set.
///
/// Wiring failures are fatal and surface at checker construction, before
/// any instance is validated.
#[derive(Debug, Error)]
pub enum WiringError {
    #[error("No validator registered for rule: {rule}")]
    MissingValidator { rule: String },

    #[error("No hook registered for {type_name}.{method}")]
    MissingHook { type_name: String, method: String },
}
