//! OnionNet CLI Client
//!
//! Originating client for the overlay: lists the registry, sends messages
//! through a circuit of relays, and inspects what a relay last saw.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use onionnet_protocol::types::{routes, MessageRequest, ResultResponse};
use onionnet_protocol::{NetworkConfig, NodeId};
use onionnet_registry::RegistryClient;

mod circuit;

use circuit::{build_onion, select_relays, CircuitPlan};

/// OnionNet CLI - onion-routed messaging over HTTP
#[derive(Parser)]
#[command(name = "onionnet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Network configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered relays
    Nodes,

    /// Send a message through a circuit of relays
    Send {
        /// Number of distinct relays, picked at random from the registry
        #[arg(long, default_value = "3", conflicts_with = "via")]
        hops: usize,

        /// Explicit relay ids, in circuit order
        #[arg(long, value_delimiter = ',')]
        via: Option<Vec<NodeId>>,

        /// Recipient user id (listens on base_user_port + id)
        #[arg(short, long, conflicts_with = "destination")]
        to: Option<u32>,

        /// Raw final destination (port)
        #[arg(short, long)]
        destination: Option<u64>,

        /// Message content
        message: String,
    },

    /// Show what a relay last received and forwarded
    Inspect {
        /// Relay id
        node_id: NodeId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = NetworkConfig::load(cli.config.as_deref())?;
    let registry = RegistryClient::from_config(&config);

    match cli.command {
        Commands::Nodes => list_nodes(&registry).await,
        Commands::Send {
            hops,
            via,
            to,
            destination,
            message,
        } => {
            let plan = match via {
                Some(ids) => CircuitPlan::Via(ids),
                None => CircuitPlan::Random(hops),
            };
            let final_destination = match (to, destination) {
                (Some(user), _) => u64::from(config.user_port(user)?),
                (None, Some(destination)) => destination,
                (None, None) => bail!("Either --to or --destination is required"),
            };
            send(&config, &registry, &plan, final_destination, &message).await
        }
        Commands::Inspect { node_id } => inspect(&config, node_id).await,
    }
}

async fn list_nodes(registry: &RegistryClient) -> anyhow::Result<()> {
    let nodes = registry
        .list_nodes()
        .await
        .with_context(|| format!("Cannot read registry at {}", registry.base_url()))?;

    if nodes.is_empty() {
        println!("No relays registered");
        return Ok(());
    }

    for node in nodes {
        println!("{:>6}  {}", node.node_id, abbreviate(&node.pub_key, 48));
    }
    Ok(())
}

async fn send(
    config: &NetworkConfig,
    registry: &RegistryClient,
    plan: &CircuitPlan,
    final_destination: u64,
    message: &str,
) -> anyhow::Result<()> {
    let nodes = registry
        .list_nodes()
        .await
        .with_context(|| format!("Cannot read registry at {}", registry.base_url()))?;

    let relays = select_relays(&nodes, plan, &mut rand::thread_rng())?;
    let circuit: Vec<String> = relays.iter().map(|r| r.node_id.to_string()).collect();
    info!(
        "Circuit: {} -> {}",
        circuit.join(" -> "),
        final_destination
    );

    let onion = build_onion(&relays, config, final_destination, message)?;
    debug!("Onion is {} chars", onion.message.len());

    let url = config.message_url(onion.entry)?;
    let response = reqwest::Client::new()
        .post(&url)
        .json(&MessageRequest {
            message: onion.message,
        })
        .send()
        .await
        .with_context(|| format!("Cannot reach entry relay at {}", url))?;

    if !response.status().is_success() {
        bail!("Entry relay rejected the message ({})", response.status());
    }

    println!("Message accepted by entry relay at {}", url);
    Ok(())
}

async fn inspect(config: &NetworkConfig, node_id: NodeId) -> anyhow::Result<()> {
    let base = config.relay_url(node_id)?;
    let http = reqwest::Client::new();

    let encrypted: Option<String> = read(&http, &base, routes::LAST_ENCRYPTED).await?;
    let decrypted: Option<String> = read(&http, &base, routes::LAST_DECRYPTED).await?;
    let destination: Option<u64> = read(&http, &base, routes::LAST_DESTINATION).await?;
    let private_key: Option<String> = read(&http, &base, routes::PRIVATE_KEY).await?;

    println!("Relay {} ({})", node_id, base);
    println!("  last encrypted:   {}", show(encrypted.as_deref()));
    println!("  last decrypted:   {}", show(decrypted.as_deref()));
    println!(
        "  last destination: {}",
        destination.map_or_else(|| "-".to_string(), |d| d.to_string())
    );
    println!("  private key:      {}", show(private_key.as_deref()));
    Ok(())
}

async fn read<T: DeserializeOwned>(
    http: &reqwest::Client,
    base: &str,
    route: &str,
) -> anyhow::Result<Option<T>> {
    let url = format!("{}{}", base, route);
    let body: ResultResponse<T> = http
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Cannot reach {}", url))?
        .error_for_status()?
        .json()
        .await?;
    Ok(body.result)
}

fn show(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), |v| abbreviate(v, 64))
}

fn abbreviate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let head: String = value.chars().take(max).collect();
    format!("{}...", head)
}
