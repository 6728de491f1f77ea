//! Network configuration
//!
//! Every process in the overlay runs on one host. The registry listens on a
//! fixed port, relay `n` listens on `base_relay_port + n`, and final
//! recipients listen on `base_user_port + n`. A destination in an onion
//! layer is simply the port of the next hop.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ProtocolError, Result};
use crate::types::routes;
use crate::NodeId;

/// Default registry port
pub const DEFAULT_REGISTRY_PORT: u16 = 8080;

/// Default port of relay 0
pub const DEFAULT_BASE_RELAY_PORT: u16 = 4000;

/// Default port of user 0
pub const DEFAULT_BASE_USER_PORT: u16 = 3000;

/// Addressing for the whole overlay
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Host every service binds to and is reached on
    pub host: String,
    /// Registry port
    pub registry_port: u16,
    /// Port of relay 0
    pub base_relay_port: u16,
    /// Port of user 0
    pub base_user_port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            registry_port: DEFAULT_REGISTRY_PORT,
            base_relay_port: DEFAULT_BASE_RELAY_PORT,
            base_user_port: DEFAULT_BASE_USER_PORT,
        }
    }
}

impl NetworkConfig {
    /// Load from a TOML file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NetworkConfig = toml::from_str(&content)?;
        debug!("Loaded network config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ProtocolError::Config("host must not be empty".to_string()));
        }
        if self.registry_port == 0 || self.base_relay_port == 0 || self.base_user_port == 0 {
            return Err(ProtocolError::Config("ports must be > 0".to_string()));
        }
        Ok(())
    }

    /// Port relay `node_id` listens on
    pub fn relay_port(&self, node_id: NodeId) -> Result<u16> {
        offset_port(self.base_relay_port, node_id)
    }

    /// Port user `user_id` listens on
    pub fn user_port(&self, user_id: u32) -> Result<u16> {
        offset_port(self.base_user_port, user_id)
    }

    /// Base URL of the registry
    pub fn registry_url(&self) -> String {
        format!("http://{}:{}", self.host, self.registry_port)
    }

    /// Base URL of relay `node_id`
    pub fn relay_url(&self, node_id: NodeId) -> Result<String> {
        Ok(format!("http://{}:{}", self.host, self.relay_port(node_id)?))
    }

    /// Message endpoint of whatever listens on `destination`
    pub fn message_url(&self, destination: u64) -> Result<String> {
        let port = u16::try_from(destination)
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| {
                ProtocolError::Config(format!("destination {} is not a valid port", destination))
            })?;
        Ok(format!("http://{}:{}{}", self.host, port, routes::MESSAGE))
    }
}

fn offset_port(base: u16, offset: u32) -> Result<u16> {
    u32::from(base)
        .checked_add(offset)
        .and_then(|port| u16::try_from(port).ok())
        .ok_or_else(|| {
            ProtocolError::Config(format!("port {} + {} exceeds 65535", base, offset))
        })
}
