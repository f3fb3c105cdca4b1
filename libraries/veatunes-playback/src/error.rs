//! Error types for playback management

use thiserror::Error;
use veatunes_client::ServerClientError;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No music server is configured, so tracks cannot be resolved
    #[error("Music server is not configured")]
    NotConfigured,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Album resolved to no playable songs
    #[error("Album has no songs: {0}")]
    EmptyAlbum(String),

    /// Server request failed
    #[error("API error: {0}")]
    Api(#[from] ServerClientError),

    /// Audio sink rejected an operation
    #[error("Audio sink error: {0}")]
    Sink(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
