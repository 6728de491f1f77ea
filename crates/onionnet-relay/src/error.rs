//! Relay error types

use actix_web::{HttpResponse, ResponseError};
use onionnet_protocol::ProtocolError;
use onionnet_registry::RegistryError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay errors
#[derive(Debug, Error)]
pub enum RelayError {
    /// Message violates the wire layout
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Outer layer could not be decrypted with this relay's key
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Registry could not be reached at startup
    #[error("Registration failed: {0}")]
    Registration(#[from] RegistryError),

    /// Next hop did not accept the payload
    #[error("Forward to {destination} failed: {reason}")]
    Forward {
        /// Next-hop destination
        destination: u64,
        /// Why the send failed
        reason: String,
    },

    /// Lifecycle step attempted out of order
    #[error("Invalid lifecycle transition: {0}")]
    InvalidState(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Binding or serving failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected fault
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProtocolError> for RelayError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::MalformedMessage(msg) => RelayError::MalformedMessage(msg),
            ProtocolError::DestinationOutOfRange(dest) => {
                RelayError::MalformedMessage(format!("destination {} out of range", dest))
            }
            ProtocolError::Decryption(e) => RelayError::Decryption(e.to_string()),
            ProtocolError::Config(msg) => RelayError::Config(msg),
            other => RelayError::Internal(other.to_string()),
        }
    }
}

impl From<onionnet_crypto::CryptoError> for RelayError {
    fn from(err: onionnet_crypto::CryptoError) -> Self {
        RelayError::Internal(err.to_string())
    }
}

// Callers learn that a message failed, never why.
impl ResponseError for RelayError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().body("error")
    }
}
