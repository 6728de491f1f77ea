//! Protocol error types

use onionnet_crypto::CryptoError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Message violates the wire layout
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// A layer could not be decrypted with the key at hand
    #[error("Decryption failed: {0}")]
    Decryption(CryptoError),

    /// Crypto failure while building a layer
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Destination does not fit the fixed-width field
    #[error("Destination {0} does not fit in the destination field")]
    DestinationOutOfRange(u64),

    /// Circuit has no hops
    #[error("Circuit must contain at least one relay")]
    EmptyCircuit,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ProtocolError {
    fn from(err: toml::de::Error) -> Self {
        ProtocolError::Config(err.to_string())
    }
}
