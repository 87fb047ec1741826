//! Internal error types for service calls.
//!
//! These errors are internal to `astel-api` and are mapped to core port errors
//! at the boundary.

use thiserror::Error;

/// Result type alias for service calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to service calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("Request to {url} failed with status {status}: {message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Best-effort message parsed from the error body
        message: String,
    },

    /// The service answered 404.
    #[error("Not found: {url}")]
    NotFound {
        /// The URL that was requested
        url: String,
        /// Best-effort message parsed from the error body
        message: String,
    },

    /// The service answered 409.
    #[error("Conflict: {message}")]
    Conflict {
        /// Server-provided explanation
        message: String,
    },

    /// The service answered 400 with validation details.
    #[error("Validation failed: {message}")]
    Validation {
        /// Flattened validation messages
        message: String,
    },

    /// The service returned an invalid or unexpected response.
    #[error("Invalid response from service: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The configured base URL cannot carry a path.
    #[error("Invalid base URL '{url}'")]
    InvalidBaseUrl {
        /// The configured value
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_error_message() {
        let error = ApiError::RequestFailed {
            status: 500,
            url: "http://localhost:5000/api/DadosCadastrais".to_string(),
            message: "Erro interno".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("DadosCadastrais"));
        assert!(msg.contains("Erro interno"));
    }

    #[test]
    fn test_conflict_error_message() {
        let error = ApiError::Conflict {
            message: "Pagamento já existe".to_string(),
        };
        assert!(error.to_string().contains("Pagamento já existe"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ApiError = json_err.into();
        assert!(matches!(error, ApiError::JsonParse(_)));
    }
}
