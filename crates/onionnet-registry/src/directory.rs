//! In-memory relay directory

use parking_lot::RwLock;
use tracing::{debug, info};

use onionnet_protocol::types::NodeEntry;
use onionnet_protocol::NodeId;

/// Outcome of a registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Entry was added
    Added,
    /// Identifier was already known; the existing key was kept
    AlreadyKnown,
}

/// Directory of relays in registration order
#[derive(Debug, Default)]
pub struct NodeDirectory {
    nodes: RwLock<Vec<NodeEntry>>,
}

impl NodeDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relay unless its identifier is already present
    pub fn register(&self, node_id: NodeId, pub_key: impl Into<String>) -> Registration {
        let mut nodes = self.nodes.write();

        if nodes.iter().any(|n| n.node_id == node_id) {
            debug!("Ignoring repeated registration of node {}", node_id);
            return Registration::AlreadyKnown;
        }

        nodes.push(NodeEntry {
            node_id,
            pub_key: pub_key.into(),
        });
        info!("Registered node {} ({} known)", node_id, nodes.len());
        Registration::Added
    }

    /// Every known relay in registration order
    pub fn list(&self) -> Vec<NodeEntry> {
        self.nodes.read().clone()
    }

    /// Look up one relay
    pub fn get(&self, node_id: NodeId) -> Option<NodeEntry> {
        self.nodes.read().iter().find(|n| n.node_id == node_id).cloned()
    }

    /// Number of known relays
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Whether no relay has registered yet
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_wins() {
        let directory = NodeDirectory::new();

        assert_eq!(directory.register(1, "key-a"), Registration::Added);
        assert_eq!(directory.register(1, "key-b"), Registration::AlreadyKnown);

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get(1).unwrap().pub_key, "key-a");
    }

    #[test]
    fn test_insertion_order() {
        let directory = NodeDirectory::new();
        for id in [5, 2, 9, 0] {
            directory.register(id, format!("key-{}", id));
        }

        let ids: Vec<NodeId> = directory.list().iter().map(|n| n.node_id).collect();
        assert_eq!(ids, vec![5, 2, 9, 0]);
    }

    #[test]
    fn test_empty() {
        let directory = NodeDirectory::new();
        assert!(directory.is_empty());
        assert!(directory.list().is_empty());
        assert!(directory.get(0).is_none());
    }
}
