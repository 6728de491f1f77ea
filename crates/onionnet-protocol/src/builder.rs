//! Onion construction for originating clients
//!
//! Layers are built from the inside out: the last relay's layer wraps the
//! final plaintext, and every earlier relay's layer wraps the message for
//! the relay after it.

use onionnet_crypto::keys::PublicKey;
use tracing::debug;

use crate::error::{ProtocolError, Result};
use crate::message::seal_layer;

/// One relay on a circuit
#[derive(Clone, Debug)]
pub struct Hop {
    /// Address the relay listens on (its port)
    pub destination: u64,
    /// Relay public key as published in the registry
    pub public_key: PublicKey,
}

impl Hop {
    /// Create a hop
    pub fn new(destination: u64, public_key: PublicKey) -> Self {
        Self {
            destination,
            public_key,
        }
    }
}

/// A fully layered message and where to send it first
#[derive(Clone, Debug)]
pub struct Onion {
    /// Destination of the entry relay
    pub entry: u64,
    /// Outermost onion message
    pub message: String,
}

/// Builds onion messages for a fixed circuit
#[derive(Clone, Debug, Default)]
pub struct OnionBuilder {
    hops: Vec<Hop>,
}

impl OnionBuilder {
    /// Create an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a relay to the end of the circuit
    pub fn hop(mut self, destination: u64, public_key: PublicKey) -> Self {
        self.hops.push(Hop::new(destination, public_key));
        self
    }

    /// Relays in the order a message traverses them
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Wrap `plaintext` for delivery to `final_destination`
    pub fn build(&self, final_destination: u64, plaintext: &str) -> Result<Onion> {
        let entry = self.hops.first().ok_or(ProtocolError::EmptyCircuit)?;

        let mut payload = plaintext.to_string();
        let mut next = final_destination;
        for hop in self.hops.iter().rev() {
            payload = seal_layer(&hop.public_key, next, &payload)?;
            next = hop.destination;
        }

        debug!(
            "Built onion through {} relays ({} chars)",
            self.hops.len(),
            payload.len()
        );

        Ok(Onion {
            entry: entry.destination,
            message: payload,
        })
    }
}
