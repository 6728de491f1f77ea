//! Relay node state machine and per-message protocol

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use onionnet_protocol::message::peel_layer;
use onionnet_protocol::{NodeId, PeeledLayer};
use onionnet_registry::RegistryClient;

use crate::error::{RelayError, Result};
use crate::forward::Forwarder;
use crate::identity::RelayIdentity;
use crate::message_log::{MessageLog, MessageLogEntry};

/// Lifecycle of a relay
///
/// A relay value only exists once its keypair does, so the lifecycle starts
/// at `KeyGenerated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayState {
    /// Keypair generated, not yet announced
    KeyGenerated,
    /// Public key accepted by the registry
    RegisteredWithDirectory,
    /// Serving traffic
    Listening,
}

/// A relay node
pub struct RelayNode {
    identity: RelayIdentity,
    log: MessageLog,
    forwarder: Arc<dyn Forwarder>,
    state: RwLock<RelayState>,
}

impl RelayNode {
    /// Create a relay with a freshly generated keypair
    pub fn generate(node_id: NodeId, forwarder: Arc<dyn Forwarder>) -> Result<Self> {
        Ok(Self::with_identity(RelayIdentity::generate(node_id)?, forwarder))
    }

    /// Create a relay around an existing identity
    pub fn with_identity(identity: RelayIdentity, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            identity,
            log: MessageLog::new(),
            forwarder,
            state: RwLock::new(RelayState::KeyGenerated),
        }
    }

    /// Relay identifier
    pub fn node_id(&self) -> NodeId {
        self.identity.node_id()
    }

    /// Relay key material
    pub fn identity(&self) -> &RelayIdentity {
        &self.identity
    }

    /// Current lifecycle state
    pub fn state(&self) -> RelayState {
        *self.state.read()
    }

    /// Announce this relay's public key
    ///
    /// Tried exactly once. A failure leaves the relay in `KeyGenerated`.
    #[instrument(skip(self, registry), fields(node_id = self.node_id()))]
    pub async fn register(&self, registry: &RegistryClient) -> Result<()> {
        if self.state() != RelayState::KeyGenerated {
            return Err(RelayError::InvalidState(format!(
                "cannot register from {:?}",
                self.state()
            )));
        }

        registry
            .register(self.node_id(), self.identity.exported_public_key())
            .await?;

        *self.state.write() = RelayState::RegisteredWithDirectory;
        Ok(())
    }

    /// Record that the relay is now serving traffic
    pub fn mark_listening(&self) -> Result<()> {
        let mut state = self.state.write();
        if *state != RelayState::RegisteredWithDirectory {
            return Err(RelayError::InvalidState(format!(
                "cannot listen from {:?}",
                *state
            )));
        }

        *state = RelayState::Listening;
        info!("Node {} is listening", self.node_id());
        Ok(())
    }

    /// Peel one layer off `message`, record it and forward the remainder
    ///
    /// The forward runs in the background; this returns as soon as the
    /// layer has been peeled and recorded. On any error the log is left
    /// untouched.
    pub async fn handle_message(&self, message: String) -> Result<PeeledLayer> {
        let layer = match peel_layer(&message, self.identity.private_key()) {
            Ok(layer) => layer,
            Err(e) => {
                let err = RelayError::from(e);
                warn!("Node {} rejected message: {}", self.node_id(), err);
                return Err(err);
            }
        };

        debug!(
            "Node {} peeled layer: {} -> {} chars for {}",
            self.node_id(),
            message.len(),
            layer.payload.len(),
            layer.destination
        );

        self.log.record(MessageLogEntry::processed(
            message,
            layer.payload.clone(),
            layer.destination,
        ));

        self.dispatch(layer.destination, layer.payload.clone());
        Ok(layer)
    }

    fn dispatch(&self, destination: u64, payload: String) {
        let forwarder = self.forwarder.clone();
        let node_id = self.node_id();

        tokio::spawn(async move {
            if let Err(e) = forwarder.forward(destination, payload).await {
                warn!("Node {} could not forward: {}", node_id, e);
            }
        });
    }

    /// Snapshot of the last processed message
    pub fn last_message(&self) -> MessageLogEntry {
        self.log.snapshot()
    }

    /// Last message as received
    pub fn last_received_encrypted_message(&self) -> Option<String> {
        self.log.snapshot().last_received_encrypted_message
    }

    /// Last payload after peeling
    pub fn last_received_decrypted_message(&self) -> Option<String> {
        self.log.snapshot().last_received_decrypted_message
    }

    /// Last next-hop destination
    pub fn last_message_destination(&self) -> Option<u64> {
        self.log.snapshot().last_message_destination
    }

    /// Exported private key
    pub fn exported_private_key(&self) -> Option<String> {
        Some(self.identity.exported_private_key().to_string())
    }
}

impl std::fmt::Debug for RelayNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayNode")
            .field("node_id", &self.node_id())
            .field("fingerprint", &self.identity.fingerprint())
            .field("state", &self.state())
            .finish()
    }
}
