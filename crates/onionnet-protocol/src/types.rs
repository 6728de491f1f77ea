//! JSON bodies and route paths shared by the registry, relays and clients

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Route paths
pub mod routes {
    /// Liveness probe (registry and relays)
    pub const STATUS: &str = "/status";
    /// Registry: announce a relay
    pub const REGISTER_NODE: &str = "/registerNode";
    /// Registry: list every known relay
    pub const GET_NODE_REGISTRY: &str = "/getNodeRegistry";
    /// Registry: look up one relay
    pub const GET_NODE: &str = "/getNode/{node_id}";
    /// Relay: accept an onion message
    pub const MESSAGE: &str = "/message";
    /// Relay: last message as received
    pub const LAST_ENCRYPTED: &str = "/getLastReceivedEncryptedMessage";
    /// Relay: last message after peeling
    pub const LAST_DECRYPTED: &str = "/getLastReceivedDecryptedMessage";
    /// Relay: last next-hop destination
    pub const LAST_DESTINATION: &str = "/getLastMessageDestination";
    /// Relay: exported private key (simulation only)
    pub const PRIVATE_KEY: &str = "/getPrivateKey";

    /// Concrete path of [`GET_NODE`] for one relay
    pub fn get_node(node_id: crate::NodeId) -> String {
        GET_NODE.replace("{node_id}", &node_id.to_string())
    }
}

/// Registry entry for one relay
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeEntry {
    /// Relay identifier
    pub node_id: NodeId,
    /// Exported relay public key
    pub pub_key: String,
}

/// `POST /registerNode` body
pub type RegisterNodeRequest = NodeEntry;

/// `GET /getNodeRegistry` body
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeRegistry {
    /// Known relays in registration order
    pub nodes: Vec<NodeEntry>,
}

/// `POST /message` body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Onion message (or final plaintext when sent to a recipient)
    pub message: String,
}

/// Body of every snapshot read
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse<T> {
    /// Value, or `null` when nothing has been recorded
    pub result: Option<T>,
}

impl<T> ResultResponse<T> {
    /// Wrap a value
    pub fn new(result: Option<T>) -> Self {
        Self { result }
    }
}
