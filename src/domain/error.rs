//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Email is already in use: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A canonical role row is missing from the reference table.
    /// Signals corrupt seed data, not a caller mistake.
    #[error("Role is not found: {0}")]
    RoleConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether this error signals a deployment defect rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::RoleConfig(_) | DomainError::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
