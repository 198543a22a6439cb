// Error handling for tourism-client

use thiserror::Error;

/// Client error type
///
/// Every public resolver and client operation either succeeds or fails with
/// exactly one of these kinds. Nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("Version not available: {0}")]
    VersionNotAvailable(String),

    #[error("Resource not available: {0}")]
    ResourceNotAvailable(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid value type: {0}")]
    InvalidValueType(String),

    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    #[error("Server returned {0}")]
    ServerError(u16),

    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    #[error("Malformed template at position {position}: {reason}")]
    MalformedTemplate { position: usize, reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid home URI: {0}")]
    InvalidHomeUri(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

// Extension trait for transport result handling
pub trait TransportResultExt<T> {
    /// Convert foreign errors to ClientError::Transport
    fn transport_err(self) -> Result<T>;
}

impl<T, E: std::fmt::Display> TransportResultExt<T> for std::result::Result<T, E> {
    fn transport_err(self) -> Result<T> {
        self.map_err(|e| ClientError::Transport(e.to_string()))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}
