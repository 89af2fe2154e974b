//! pulsewire server
//!
//! Serves the echo endpoint until Ctrl+C or SIGTERM, then closes every live
//! session before exiting.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pw_core::config::{self, ServerConfig};
use pw_core::signal;
use pw_server::EchoServer;

#[derive(Parser)]
#[command(name = "pw-server")]
#[command(about = "pulsewire server - WebSocket echo with heartbeat replies")]
#[command(version)]
struct Args {
    /// Address to listen on (host:port)
    #[arg(short, long, env = "PW_ADDR")]
    addr: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| args.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = load_server_config(args.config.as_deref())?;
    if let Some(addr) = args.addr {
        config.bind_address = addr;
    }
    config.validate().context("Invalid server configuration")?;

    tracing::info!("Starting pulsewire server v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    signal::cancel_on_signal(shutdown.clone());

    let server = EchoServer::new(config, shutdown);
    server.bind_and_run().await?;

    tracing::info!("Server exiting");
    Ok(())
}

/// Load the server configuration, falling back to defaults
fn load_server_config(path: Option<&std::path::Path>) -> Result<ServerConfig> {
    if let Some(path) = path {
        return config::load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = config::default_config_dir().join("server.toml");
    if default_path.exists() {
        Ok(config::load_config(&default_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {:?}: {}", default_path, e);
            ServerConfig::default()
        }))
    } else {
        Ok(ServerConfig::default())
    }
}
