//! Delivery of peeled payloads to the next hop
//!
//! Forwarding is best effort: one attempt, no timeout, no retry. A relay
//! acknowledges its sender before the forward completes, so a failure here
//! is only ever logged.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use onionnet_protocol::types::MessageRequest;
use onionnet_protocol::NetworkConfig;

use crate::error::{RelayError, Result};

/// Sends a payload to whatever listens on `destination`
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Deliver `payload` once
    async fn forward(&self, destination: u64, payload: String) -> Result<()>;
}

/// Forwards over HTTP to `http://{host}:{destination}/message`
#[derive(Clone, Debug)]
pub struct HttpForwarder {
    config: NetworkConfig,
    http: reqwest::Client,
}

impl HttpForwarder {
    /// Create a forwarder addressing hops on `config.host`
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, destination: u64, payload: String) -> Result<()> {
        let url = self
            .config
            .message_url(destination)
            .map_err(|e| RelayError::Forward {
                destination,
                reason: e.to_string(),
            })?;

        debug!("Forwarding {} chars to {}", payload.len(), url);

        let response = self
            .http
            .post(&url)
            .json(&MessageRequest { message: payload })
            .send()
            .await
            .map_err(|e| RelayError::Forward {
                destination,
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RelayError::Forward {
                destination,
                reason: format!("next hop answered {}", response.status()),
            });
        }

        Ok(())
    }
}

/// Hands payloads to an in-process channel instead of the network
///
/// Useful for embedding a relay whose output is consumed locally.
#[derive(Clone, Debug)]
pub struct ChannelForwarder {
    tx: mpsc::UnboundedSender<(u64, String)>,
}

impl ChannelForwarder {
    /// Create a forwarder and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(u64, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Forwarder for ChannelForwarder {
    async fn forward(&self, destination: u64, payload: String) -> Result<()> {
        self.tx
            .send((destination, payload))
            .map_err(|_| RelayError::Forward {
                destination,
                reason: "channel closed".to_string(),
            })
    }
}
