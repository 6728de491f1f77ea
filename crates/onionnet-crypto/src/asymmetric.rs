//! RSA-OAEP wrapping of one-time layer keys
//!
//! Plaintexts and ciphertexts are base64 strings. The ciphertext of a
//! 2048-bit key is always [`RSA_BLOCK_ENCODED_LEN`] characters long, which is
//! what lets a relay split an onion message without a length prefix.

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::Oaep;
use sha2::Sha256;

use crate::error::{CryptoError, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::RSA_BLOCK_ENCODED_LEN;

/// Encrypt base64 `data` for the holder of `key`
///
/// The decoded bytes of `data` are encrypted with RSA-OAEP (SHA-256) and the
/// resulting block is returned base64 encoded.
pub fn rsa_encrypt(data: &str, key: &PublicKey) -> Result<String> {
    let plaintext = STANDARD.decode(data)?;
    let mut rng = rand::thread_rng();

    let ciphertext = key
        .0
        .encrypt(&mut rng, Oaep::new::<Sha256>(), &plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    Ok(STANDARD.encode(ciphertext))
}

/// Decrypt exactly one encoded RSA block, returning the plaintext as base64
pub fn rsa_decrypt(ciphertext: &str, key: &PrivateKey) -> Result<String> {
    if ciphertext.len() != RSA_BLOCK_ENCODED_LEN {
        return Err(CryptoError::InvalidBlockLength {
            expected: RSA_BLOCK_ENCODED_LEN,
            actual: ciphertext.len(),
        });
    }

    let block = STANDARD.decode(ciphertext)?;
    let plaintext = key
        .0
        .decrypt(Oaep::new::<Sha256>(), &block)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;

    Ok(STANDARD.encode(plaintext))
}
