//! OnionNet Relay Node Service
//!
//! Starts one or more onion routers in a single process. Router `n` generates
//! a fresh keypair, registers with the registry and then listens on
//! `base_relay_port + n`. The registry must already be running: a router
//! that cannot register does not start, and neither does this process.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use futures::future::try_join_all;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use onionnet_protocol::{NetworkConfig, NodeId};
use onionnet_relay::launch_relay;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "relay-node-service")]
#[command(about = "OnionNet Relay Node Service")]
struct Args {
    /// Network configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of routers to start, with ids 0..nodes
    #[arg(short, long, default_value = "1", conflicts_with = "node_id")]
    nodes: u32,

    /// Start a single router with this id
    #[arg(long)]
    node_id: Option<NodeId>,

    /// Registry port (overrides config)
    #[arg(long)]
    registry_port: Option<u16>,

    /// Port of router 0 (overrides config)
    #[arg(long)]
    base_port: Option<u16>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = NetworkConfig::load(args.config.as_deref())?;
    if let Some(port) = args.registry_port {
        config.registry_port = port;
    }
    if let Some(port) = args.base_port {
        config.base_relay_port = port;
    }
    config.validate()?;

    let ids: Vec<NodeId> = match args.node_id {
        Some(id) => vec![id],
        None => (0..args.nodes).collect(),
    };

    info!("Starting {} onion routers", ids.len());

    let mut servers = Vec::with_capacity(ids.len());
    for id in ids {
        let relay = launch_relay(id, &config)
            .await
            .with_context(|| format!("Onion router {} failed to start", id))?;
        servers.push(relay.server);
    }

    try_join_all(servers).await?;
    Ok(())
}
