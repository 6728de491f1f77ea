//! OnionNet Registry Service
//!
//! Keeps the directory of relays and their public keys. Relays announce
//! themselves here on startup; originating clients read it to build circuits.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use onionnet_protocol::NetworkConfig;
use onionnet_registry::launch_registry;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "registry-service")]
#[command(about = "OnionNet Registry Service")]
struct Args {
    /// Network configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to bind to (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

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
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.registry_port = port;
    }
    config.validate()?;

    info!("Starting OnionNet Registry Service");
    info!("Binding to {}:{}", config.host, config.registry_port);

    let (server, _directory) = launch_registry(&config)?;
    server.await?;
    Ok(())
}
