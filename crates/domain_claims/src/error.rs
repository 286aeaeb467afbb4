//! Claims domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Stable classification of a [`ClaimError`]
///
/// Callers branch on this rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input
    Validation,
    /// Unknown claim identifier
    NotFound,
    /// Actor lacks the role required for the operation
    Forbidden,
    /// Uniqueness or concurrent-write conflict
    Conflict,
    /// Operation not allowed in the claim's current status
    InvalidState,
    /// The persistence collaborator failed
    Unavailable,
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {role} may not {action}")]
    Forbidden { role: String, action: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Claim {0} is closed")]
    ClaimClosed(String),

    #[error("Storage error: {0}")]
    Storage(#[source] PortError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::Validation(_) => ErrorKind::Validation,
            ClaimError::NotFound(_) => ErrorKind::NotFound,
            ClaimError::Forbidden { .. } => ErrorKind::Forbidden,
            ClaimError::Conflict(_) => ErrorKind::Conflict,
            ClaimError::InvalidStatusTransition { .. } | ClaimError::ClaimClosed(_) => {
                ErrorKind::InvalidState
            }
            ClaimError::Storage(_) => ErrorKind::Unavailable,
        }
    }

    /// True when repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClaimError::Conflict(_) => true,
            ClaimError::Storage(e) => e.is_transient(),
            _ => false,
        }
    }
}

impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { id, .. } => ClaimError::NotFound(id),
            PortError::Conflict { message } => ClaimError::Conflict(message),
            PortError::Validation { message, .. } => ClaimError::Validation(message),
            other => ClaimError::Storage(other),
        }
    }
}

impl From<validator::ValidationErrors> for ClaimError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        ClaimError::Validation(format!("invalid fields: {}", fields.join(", ")))
    }
}
