//! Authenticated symmetric encryption for onion layers
//!
//! Each layer is sealed with AES-256-GCM under a one-time key. The wire form
//! is `base64(nonce || ciphertext || tag)` with a random 96-bit nonce, so a
//! tampered or truncated layer fails authentication instead of yielding
//! garbage.

use aes_gcm::{
    aead::{Aead as AeadTrait, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};

/// Nonce size for AES-256-GCM (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits)
pub const TAG_SIZE: usize = 16;

/// Key size (256 bits)
pub const KEY_SIZE: usize = 32;

/// One-time layer key with automatic zeroization
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut key);
        Self(key)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Export as base64 of the raw key bytes
    pub fn export(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Import from base64 of the raw key bytes
    pub fn import(encoded: &str) -> Result<Self> {
        let mut bytes = STANDARD.decode(encoded)?;
        if bytes.len() != KEY_SIZE {
            let actual = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual,
            });
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(key))
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Encrypt a UTF-8 layer payload
pub fn sym_encrypt(key: &SymmetricKey, plaintext: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CryptoError::EncryptionFailed("AES-256-GCM failed".to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(sealed))
}

/// Decrypt a layer payload produced by [`sym_encrypt`]
pub fn sym_decrypt(key: &SymmetricKey, ciphertext: &str) -> Result<String> {
    let sealed = STANDARD.decode(ciphertext)?;
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::DecryptionFailed(format!(
            "ciphertext too short: {} bytes",
            sealed.len()
        )));
    }

    let (nonce, body) = sealed.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), body)
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    Ok(String::from_utf8(plaintext)?)
}
