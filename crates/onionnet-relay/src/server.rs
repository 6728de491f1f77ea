//! Relay startup and HTTP server

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpServer};
use tracing::info;

use onionnet_protocol::{NetworkConfig, NodeId};
use onionnet_registry::RegistryClient;

use crate::api;
use crate::error::Result;
use crate::forward::HttpForwarder;
use crate::node::RelayNode;

/// A relay that has registered and is serving
pub struct RunningRelay {
    /// Shared relay state
    pub node: web::Data<RelayNode>,
    /// Server future; must be awaited or spawned to make progress
    pub server: Server,
    /// Bound address
    pub address: SocketAddr,
}

/// Register `node` and serve it on an already bound listener
///
/// The listener only starts accepting once registration succeeded.
pub async fn serve_relay(
    node: web::Data<RelayNode>,
    registry: &RegistryClient,
    listener: TcpListener,
) -> Result<RunningRelay> {
    node.register(registry).await?;
    start(node, listener)
}

/// Start relay `node_id` on `base_relay_port + node_id`
///
/// Generates a fresh keypair, registers it, then binds. Registration failure
/// is fatal and nothing is bound.
pub async fn launch_relay(node_id: NodeId, config: &NetworkConfig) -> Result<RunningRelay> {
    let forwarder = Arc::new(HttpForwarder::new(config.clone()));
    let node = web::Data::new(RelayNode::generate(node_id, forwarder)?);

    node.register(&RegistryClient::from_config(config)).await?;

    let port = config.relay_port(node_id)?;
    let listener = TcpListener::bind((config.host.as_str(), port))?;
    start(node, listener)
}

fn start(node: web::Data<RelayNode>, listener: TcpListener) -> Result<RunningRelay> {
    let address = listener.local_addr()?;

    let data = node.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .wrap(actix_cors::Cors::permissive())
            .configure(api::configure_routes)
    })
    .listen(listener)?
    .run();

    node.mark_listening()?;
    info!("Onion router {} is listening on {}", node.node_id(), address);

    Ok(RunningRelay {
        node,
        server,
        address,
    })
}
