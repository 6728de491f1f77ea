//! HTTP client for the registry

use tracing::{debug, info};

use onionnet_protocol::types::{
    routes, NodeEntry, NodeRegistry, RegisterNodeRequest, ResultResponse,
};
use onionnet_protocol::{NetworkConfig, NodeId};

use crate::error::{RegistryError, Result};

/// Client used by relays to announce themselves and by originators to read
/// the directory
#[derive(Clone, Debug)]
pub struct RegistryClient {
    base_url: String,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Create a client for the registry at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client for the registry described by `config`
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.registry_url())
    }

    /// Registry base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Announce a relay's public key
    pub async fn register(&self, node_id: NodeId, pub_key: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, routes::REGISTER_NODE);
        debug!("Registering node {} at {}", node_id, url);

        let response = self
            .http
            .post(&url)
            .json(&RegisterNodeRequest {
                node_id,
                pub_key: pub_key.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RegistryError::Rejected {
                status: response.status().as_u16(),
            });
        }

        info!("Node {} registered with {}", node_id, self.base_url);
        Ok(())
    }

    /// Fetch every known relay
    pub async fn list_nodes(&self) -> Result<Vec<NodeEntry>> {
        let url = format!("{}{}", self.base_url, routes::GET_NODE_REGISTRY);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let registry: NodeRegistry = response.json().await?;
        Ok(registry.nodes)
    }

    /// Look up a single relay; `None` if it never registered
    pub async fn get_node(&self, node_id: NodeId) -> Result<Option<NodeEntry>> {
        let url = format!("{}{}", self.base_url, routes::get_node(node_id));
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let body: ResultResponse<NodeEntry> = response.json().await?;
        Ok(body.result)
    }

    /// Check that the registry is up
    pub async fn status(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, routes::STATUS);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
