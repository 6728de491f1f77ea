//! Registry error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry could not be reached
    #[error("Registry unreachable: {0}")]
    Unreachable(String),

    /// Registry answered with a non-success status
    #[error("Registry rejected request with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
    },

    /// Registry answered with an unexpected body
    #[error("Invalid registry response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Binding or serving failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RegistryError::InvalidResponse(err.to_string())
        } else {
            RegistryError::Unreachable(err.to_string())
        }
    }
}

impl From<onionnet_protocol::ProtocolError> for RegistryError {
    fn from(err: onionnet_protocol::ProtocolError) -> Self {
        RegistryError::Config(err.to_string())
    }
}
