//! Relay key material

use onionnet_crypto::keys::{KeyPair, PrivateKey};
use onionnet_protocol::NodeId;
use tracing::info;

use crate::error::Result;

/// Keys a relay holds for its whole lifetime
///
/// Generated fresh on every start; nothing is persisted.
#[derive(Clone, Debug)]
pub struct RelayIdentity {
    node_id: NodeId,
    private_key: PrivateKey,
    exported_private_key: String,
    exported_public_key: String,
    fingerprint: String,
}

impl RelayIdentity {
    /// Generate a new identity for `node_id`
    pub fn generate(node_id: NodeId) -> Result<Self> {
        let pair = KeyPair::generate()?;
        let identity = Self {
            node_id,
            exported_private_key: pair.private.export()?,
            exported_public_key: pair.public.export()?,
            fingerprint: pair.public.fingerprint()?,
            private_key: pair.private,
        };

        info!("Node {} generated key {}", node_id, identity.fingerprint);
        Ok(identity)
    }

    /// Rebuild an identity from an exported private key
    #[cfg(test)]
    pub(crate) fn from_exported(node_id: NodeId, exported_private_key: &str) -> Result<Self> {
        let private_key = PrivateKey::import(exported_private_key)?;
        let public_key = private_key.public_key();

        Ok(Self {
            node_id,
            exported_private_key: private_key.export()?,
            exported_public_key: public_key.export()?,
            fingerprint: public_key.fingerprint()?,
            private_key,
        })
    }

    /// Relay identifier
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Private key used to peel layers
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Exported private key
    pub fn exported_private_key(&self) -> &str {
        &self.exported_private_key
    }

    /// Exported public key, as published in the registry
    pub fn exported_public_key(&self) -> &str {
        &self.exported_public_key
    }

    /// Short public key fingerprint
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
