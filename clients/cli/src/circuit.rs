//! Circuit selection and onion construction

use anyhow::{bail, Context};
use rand::seq::SliceRandom;
use rand::Rng;

use onionnet_crypto::keys::PublicKey;
use onionnet_protocol::builder::{Onion, OnionBuilder};
use onionnet_protocol::types::NodeEntry;
use onionnet_protocol::{NetworkConfig, NodeId};

/// How the relays of a circuit are chosen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitPlan {
    /// This many distinct relays, picked at random
    Random(usize),
    /// Exactly these relays, in this order
    Via(Vec<NodeId>),
}

/// Pick the relays for `plan` out of the registry listing
pub fn select_relays<R: Rng + ?Sized>(
    nodes: &[NodeEntry],
    plan: &CircuitPlan,
    rng: &mut R,
) -> anyhow::Result<Vec<NodeEntry>> {
    match plan {
        CircuitPlan::Random(0) => bail!("A circuit needs at least one relay"),
        CircuitPlan::Random(hops) => {
            if *hops > nodes.len() {
                bail!(
                    "Asked for {} relays but only {} are registered",
                    hops,
                    nodes.len()
                );
            }
            Ok(nodes.choose_multiple(rng, *hops).cloned().collect())
        }
        CircuitPlan::Via(ids) => {
            if ids.is_empty() {
                bail!("A circuit needs at least one relay");
            }
            ids.iter()
                .map(|id| {
                    nodes
                        .iter()
                        .find(|node| node.node_id == *id)
                        .cloned()
                        .with_context(|| format!("Relay {} is not registered", id))
                })
                .collect()
        }
    }
}

/// Layer `plaintext` for the chosen relays, ending at `final_destination`
pub fn build_onion(
    relays: &[NodeEntry],
    config: &NetworkConfig,
    final_destination: u64,
    plaintext: &str,
) -> anyhow::Result<Onion> {
    let mut builder = OnionBuilder::new();
    for relay in relays {
        let key = PublicKey::import(&relay.pub_key)
            .with_context(|| format!("Relay {} published an unusable key", relay.node_id))?;
        let port = config.relay_port(relay.node_id)?;
        builder = builder.hop(u64::from(port), key);
    }

    Ok(builder.build(final_destination, plaintext)?)
}
