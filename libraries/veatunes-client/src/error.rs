//! Error types for the Subsonic client.

use thiserror::Error;

/// Errors that can occur when talking to a Subsonic server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server answered `status="failed"` inside the Subsonic envelope
    #[error("Subsonic error {code}: {message}")]
    Api { code: i32, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Credentials missing from the configuration
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ServerClientError {
    /// Subsonic error code 40: wrong username or password.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Api { code: 40 | 41, .. })
    }

    /// Subsonic error code 70: requested data was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code: 70, .. })
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
