//! Error types for cryptographic operations

use thiserror::Error;

/// Result type alias for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Key could not be exported
    #[error("Key export failed: {0}")]
    KeyExport(String),

    /// Key material could not be parsed
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Asymmetric block has the wrong length
    #[error("Invalid ciphertext block length: expected {expected}, got {actual}")]
    InvalidBlockLength {
        /// Required encoded length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Authentication failed (GCM tag mismatch)
    #[error("Message authentication failed")]
    AuthenticationFailed,

    /// Base64 or UTF-8 decoding failed
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl CryptoError {
    /// Whether this error came from undoing a cipher, as opposed to handling
    /// keys
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::InvalidBlockLength { .. }
                | CryptoError::DecryptionFailed(_)
                | CryptoError::AuthenticationFailed
                | CryptoError::Encoding(_)
        )
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::Encoding(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CryptoError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CryptoError::Encoding(err.to_string())
    }
}

impl From<rsa::pkcs8::Error> for CryptoError {
    fn from(err: rsa::pkcs8::Error) -> Self {
        CryptoError::InvalidKey(err.to_string())
    }
}

impl From<rsa::pkcs8::spki::Error> for CryptoError {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        CryptoError::InvalidKey(err.to_string())
    }
}
