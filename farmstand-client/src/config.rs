//! Client configuration

use crate::{ClientResult, NetworkHttpClient};

/// Default remote store address when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration for connecting to the remote store
///
/// Read once at startup and handed to the client constructor; nothing in
/// the client reads the environment ad hoc per call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Bearer token attached to requests, when already authenticated
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            token: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
