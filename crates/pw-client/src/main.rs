//! pulsewire client
//!
//! Connects to the server's WebSocket endpoint, sends a heartbeat probe on
//! every tick and closes the connection cleanly on Ctrl+C.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pw_client::{Connector, HeartbeatMonitor};
use pw_core::config::{self, ClientConfig};
use pw_core::{signal, Session};

#[derive(Parser)]
#[command(name = "pw-client")]
#[command(about = "pulsewire client - heartbeat-probed WebSocket session")]
#[command(version)]
struct Args {
    /// Server address (host:port)
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

    let mut config = load_client_config(args.config.as_deref())?;
    if let Some(addr) = args.addr {
        config.server_address = addr;
    }
    config.validate().context("Invalid client configuration")?;

    let shutdown = CancellationToken::new();
    signal::cancel_on_signal(shutdown.clone());

    let connector = Connector::new(config.clone());
    let (source, sink) = connector
        .connect()
        .await
        .with_context(|| format!("dial {}", config.url()))?;
    tracing::info!("Connected to {}", config.url());

    let dispatcher = HeartbeatMonitor::new(config.session.body_format);
    let exit = Session::new(source, sink, dispatcher, config.session, shutdown)
        .run()
        .await;

    tracing::info!("Client exiting: {}", exit);
    Ok(())
}

/// Load the client configuration, falling back to defaults
fn load_client_config(path: Option<&std::path::Path>) -> Result<ClientConfig> {
    if let Some(path) = path {
        return config::load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = config::default_config_dir().join("client.toml");
    if default_path.exists() {
        Ok(config::load_config(&default_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {:?}: {}", default_path, e);
            ClientConfig::default()
        }))
    } else {
        Ok(ClientConfig::default())
    }
}
