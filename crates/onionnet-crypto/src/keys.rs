//! RSA key management
//!
//! Relays own one RSA-2048 keypair for their whole lifetime. The public half
//! is published to the registry as base64 SPKI DER; the private half is
//! exported as base64 PKCS#8 DER.

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::{CryptoError, Result};
use crate::RSA_KEY_BITS;

/// Length of a public key fingerprint in bytes
pub const FINGERPRINT_SIZE: usize = 8;

/// RSA public key used to wrap one-time layer keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(pub(crate) RsaPublicKey);

/// RSA private key used to unwrap one-time layer keys
#[derive(Clone)]
pub struct PrivateKey(pub(crate) RsaPrivateKey);

/// A freshly generated RSA keypair
#[derive(Clone)]
pub struct KeyPair {
    /// Public half, published to the registry
    pub public: PublicKey,
    /// Private half, owned by the relay
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generate a new RSA-2048 keypair suitable for OAEP
    pub fn generate() -> Result<Self> {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public = RsaPublicKey::from(&private);

        Ok(Self {
            public: PublicKey(public),
            private: PrivateKey(private),
        })
    }
}

impl PublicKey {
    /// Export as base64 SPKI DER
    pub fn export(&self) -> Result<String> {
        let der = self
            .0
            .to_public_key_der()
            .map_err(|e| CryptoError::KeyExport(e.to_string()))?;
        Ok(STANDARD.encode(der.as_bytes()))
    }

    /// Import from base64 SPKI DER
    pub fn import(encoded: &str) -> Result<Self> {
        let der = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self(RsaPublicKey::from_public_key_der(&der)?))
    }

    /// Short hex fingerprint for logging
    pub fn fingerprint(&self) -> Result<String> {
        let der = self
            .0
            .to_public_key_der()
            .map_err(|e| CryptoError::KeyExport(e.to_string()))?;
        let digest = Sha256::digest(der.as_bytes());
        Ok(hex::encode(&digest[..FINGERPRINT_SIZE]))
    }
}

impl PrivateKey {
    /// Export as base64 PKCS#8 DER
    pub fn export(&self) -> Result<String> {
        let der = self
            .0
            .to_pkcs8_der()
            .map_err(|e| CryptoError::KeyExport(e.to_string()))?;
        Ok(STANDARD.encode(der.as_bytes()))
    }

    /// Import from base64 PKCS#8 DER
    pub fn import(encoded: &str) -> Result<Self> {
        let der = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self(RsaPrivateKey::from_pkcs8_der(&der)?))
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey(RsaPublicKey::from(&self.0))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Generate a new keypair
pub fn generate_keypair() -> Result<KeyPair> {
    KeyPair::generate()
}

/// Export a public key to its wire form
pub fn export_public_key(key: &PublicKey) -> Result<String> {
    key.export()
}

/// Export a private key to its wire form
pub fn export_private_key(key: &PrivateKey) -> Result<String> {
    key.export()
}

/// Import a public key from its wire form
pub fn import_public_key(encoded: &str) -> Result<PublicKey> {
    PublicKey::import(encoded)
}

/// Import a private key from its wire form
pub fn import_private_key(encoded: &str) -> Result<PrivateKey> {
    PrivateKey::import(encoded)
}
