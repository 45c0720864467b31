//! peerdial binary
//!
//! Dials a single Bitcoin peer, sends the initial "version" message, and
//! logs the bytes the peer sends back.

use anyhow::Result;
use clap::Parser;
use peerdial::config::NodeConfig;
use peerdial::network::HandshakeClient;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "peerdial", about = "Bitcoin P2P handshake probe")]
struct Args {
    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Peer host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Peer port, overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let mut config = match &args.config {
        Some(path) => NodeConfig::from_file(path)?,
        None => NodeConfig::default(),
    };
    if let Some(host) = args.host {
        config.peer_host = host;
    }
    if let Some(port) = args.port {
        config.peer_port = port;
    }
    config.validate()?;

    info!(
        "Dialing {} (magic {:#010x}, protocol version {})",
        config.peer_endpoint(),
        config.magic,
        config.protocol_version
    );

    HandshakeClient::new(config).run().await
}
