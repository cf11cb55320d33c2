//! Client error types

use http::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx response from the remote store
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Local validation failure; no request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// 2xx response whose body did not parse
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True when this error came back from the store rather than from
    /// local validation.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
