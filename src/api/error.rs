//! Error types for the Meridian node API client.

use thiserror::Error;

/// Error type for node API operations.
///
/// There is no retry layer: every non-success response is surfaced
/// immediately and aborts the calling flow.
#[derive(Debug, Error)]
pub enum NodeError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-success status
    #[error("node returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// JSON deserialization error
    #[error("failed to deserialize node response: {0}")]
    Deserialize(String),

    /// Invalid parameter provided by the caller
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for node API operations.
pub type NodeResult<T> = Result<T, NodeError>;
