//! Last-message snapshot

use parking_lot::RwLock;

/// What a relay saw in the last message it processed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLogEntry {
    /// Message as received, outer layer intact
    pub last_received_encrypted_message: Option<String>,
    /// Payload left after removing the outer layer
    pub last_received_decrypted_message: Option<String>,
    /// Next-hop destination parsed from the layer
    pub last_message_destination: Option<u64>,
}

impl MessageLogEntry {
    /// Entry for a fully processed message
    pub fn processed(encrypted: String, decrypted: String, destination: u64) -> Self {
        Self {
            last_received_encrypted_message: Some(encrypted),
            last_received_decrypted_message: Some(decrypted),
            last_message_destination: Some(destination),
        }
    }
}

/// Single-slot message log
///
/// Writes replace the whole entry; concurrent writers race and the last one
/// wins.
#[derive(Debug, Default)]
pub struct MessageLog {
    slot: RwLock<MessageLogEntry>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current entry
    pub fn record(&self, entry: MessageLogEntry) {
        *self.slot.write() = entry;
    }

    /// Copy of the current entry
    pub fn snapshot(&self) -> MessageLogEntry {
        self.slot.read().clone()
    }
}
