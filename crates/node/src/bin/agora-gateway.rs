// Path: crates/node/src/bin/agora-gateway.rs

use agora_api::global::GlobalState;
use agora_node::fixture::Fixture;
use agora_node::shutdown::forward_shutdown;
use agora_state::{CommittedState, MemoryLedger};
use agora_telemetry::init::{init_tracing, LogFormat};
use agora_types::codec::PublicKeyCodec;
use agora_types::config::GatewayConfig;
use anyhow::{Context, Result};
use clap::Parser;
use global_state_gateway::{run_server, GlobalStateService};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Serves the global-state gateway over HTTP.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct GatewayOpts {
    /// Path to the gateway.toml configuration file. Defaults apply when omitted.
    #[arg(long, env = "AGORA_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// JSON fixture used to seed the in-memory ledger and global state.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Overrides `listen_addr` from the configuration file.
    #[arg(long)]
    listen_addr: Option<String>,
}

fn load_config(opts: &GatewayOpts) -> Result<GatewayConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GatewayConfig::default(),
    };
    if let Some(addr) = &opts.listen_addr {
        config.listen_addr = addr.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LogFormat::from_env(), "info")?;
    let opts = GatewayOpts::parse();
    let config = load_config(&opts)?;
    tracing::info!(target: "gateway", ?config, "loaded configuration");

    let codec = PublicKeyCodec::new(config.network);
    let (ledger, globals) = match &opts.fixture {
        Some(path) => Fixture::load(path)?.seed(&codec)?,
        None => (
            MemoryLedger::new(CommittedState {
                block_height: 1,
                ..Default::default()
            }),
            GlobalState::new(),
        ),
    };
    tracing::info!(
        target: "gateway",
        height = ledger.committed().block_height,
        pending = ledger.pending_len(),
        whitelisted = globals.feed_whitelist.load().len(),
        "state seeded"
    );

    let service = GlobalStateService::new(&config, Arc::new(globals), Arc::new(ledger));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(forward_shutdown(tokio::signal::ctrl_c(), shutdown_tx));

    agora_telemetry::http::set_ready(true);
    run_server(config, service, shutdown_rx).await
}
