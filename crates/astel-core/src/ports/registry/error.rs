//! Error types for registry port operations.

use thiserror::Error;

use crate::domain::InvalidPaymentKey;

/// Errors from registry port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum RegistryPortError {
    /// The addressed record does not exist (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound {
        /// What was looked up
        resource: String,
    },

    /// The record already exists (HTTP 409), e.g. a duplicate payment month.
    #[error("{message}")]
    Conflict {
        /// Server-provided explanation
        message: String,
    },

    /// The service rejected the payload.
    #[error("{message}")]
    Validation {
        /// Flattened validation messages, one per line
        message: String,
    },

    /// Any other non-success response.
    #[error("Request failed with status {status}: {message}")]
    Request {
        /// HTTP status code
        status: u16,
        /// Best-effort message from the error body
        message: String,
    },

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// Invalid response from the service.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Rejected locally before any request was made.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl RegistryPortError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<InvalidPaymentKey> for RegistryPortError {
    fn from(err: InvalidPaymentKey) -> Self {
        Self::InvalidInput {
            message: err.to_string(),
        }
    }
}

/// Result type alias for registry port operations.
pub type RegistryPortResult<T> = Result<T, RegistryPortError>;
