//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use astel_core::{RegistryPortError, SessionError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The service refused or failed the request.
    #[error("{0}")]
    Service(String),

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// No usable session.
    #[error("{0}")]
    Auth(String),

    /// The service could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Service(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::NotFound(_) => 66,   // EX_NOINPUT
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Auth(_) => 77,       // EX_NOPERM
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<RegistryPortError> for CliError {
    fn from(err: RegistryPortError) -> Self {
        match err {
            RegistryPortError::NotFound { .. } => Self::NotFound(err.to_string()),
            RegistryPortError::Validation { .. } | RegistryPortError::InvalidInput { .. } => {
                Self::Arguments(err.to_string())
            }
            RegistryPortError::Network { .. } => Self::Unavailable(err.to_string()),
            RegistryPortError::Configuration { message } => Self::Config(message),
            RegistryPortError::Conflict { .. }
            | RegistryPortError::Request { .. }
            | RegistryPortError::InvalidResponse { .. } => Self::Service(err.to_string()),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Storage { message } => Self::Io(message),
            SessionError::NotConfigured => Self::Config(err.to_string()),
            other => Self::Auth(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error returned from `main`.
///
/// Errors that are not a [`CliError`] exit with 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
