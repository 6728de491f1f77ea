//! # OnionNet Cryptographic Library
//!
//! Primitives used to build and peel onion layers.
//!
//! Every hop of an onion message is protected by two ciphers:
//!
//! - a one-time AES-256-GCM key encrypts the hop's payload ([`aead`])
//! - the hop's RSA-2048 public key wraps that one-time key with OAEP
//!   ([`asymmetric`])
//!
//! All key material crosses process boundaries as base64 strings, so every
//! operation here takes and returns `String`s. Keys are exported as SPKI
//! (public) and PKCS#8 (private) DER, see [`keys`].

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod aead;
pub mod asymmetric;
pub mod error;
pub mod keys;

pub use error::{CryptoError, Result};

/// RSA modulus size in bits
pub const RSA_KEY_BITS: usize = 2048;

/// Size of one RSA ciphertext block in bytes
pub const RSA_BLOCK_BYTES: usize = RSA_KEY_BITS / 8;

/// Length of one RSA ciphertext block once base64 encoded (with padding)
pub const RSA_BLOCK_ENCODED_LEN: usize = (RSA_BLOCK_BYTES + 2) / 3 * 4;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aead::{sym_decrypt, sym_encrypt, SymmetricKey};
    pub use crate::asymmetric::{rsa_decrypt, rsa_encrypt};
    pub use crate::error::{CryptoError, Result};
    pub use crate::keys::{KeyPair, PrivateKey, PublicKey};
}
