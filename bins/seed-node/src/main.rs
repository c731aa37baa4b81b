//! Seedcoin node binary.
//!
//! Selects the network, validates its compiled-in parameters, and answers
//! checkpoint queries against the active table.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seed_core::constants::NetworkType;
use seed_core::params::ChainParams;
use seed_core::types::Hash256;
use seed_node_lib::{ChainTracker, LogFormat, NodeConfig};
use tracing::{error, info};

/// Seedcoin node.
#[derive(Parser, Debug)]
#[command(name = "seed-node", version, about = "Seedcoin node with checkpoint enforcement")]
struct Args {
    /// Network to run on (mainnet or testnet).
    #[arg(long, conflicts_with = "testnet")]
    network: Option<NetworkType>,

    /// Shorthand for `--network testnet`.
    #[arg(long)]
    testnet: bool,

    /// Data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print tip, sync checkpoint, and checkpoint progress.
    Status,
    /// List the active network's hardened checkpoints.
    Checkpoints {
        #[arg(long)]
        json: bool,
    },
    /// Print the height of the highest checkpoint.
    Estimate,
    /// Verify a block hash against the checkpoint at `height`.
    ///
    /// Exits with status 1 on mismatch.
    Check {
        height: u64,
        hash: Hash256,
    },
    /// Print the active network parameters.
    Params {
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    fn into_config(self) -> (NodeConfig, Option<Command>) {
        let network = match (self.network, self.testnet) {
            (Some(net), _) => net,
            (None, true) => NetworkType::Testnet,
            (None, false) => NetworkType::Mainnet,
        };
        let defaults = NodeConfig::for_network(network);
        let config = NodeConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            log_level: self.log_level,
            log_format: self.log_format,
            ..defaults
        };
        (config, self.command)
    }
}

fn main() -> Result<()> {
    let (config, command) = Args::parse().into_config();
    init_logging(&config.log_level, config.log_format);

    info!("Seedcoin node v{}", env!("CARGO_PKG_VERSION"));
    info!(network = %config.network, data_dir = ?config.data_dir, "starting");

    let params = match ChainParams::for_network(config.network) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!("invalid chain parameters for {}: {}", config.network, e);
            process::exit(1);
        }
    };
    let tracker = ChainTracker::new(Arc::clone(&params)).context("failed to start chain tracker")?;

    match command.unwrap_or(Command::Status) {
        Command::Status => {
            let status = tracker.status();
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Checkpoints { json } => {
            let table = tracker.registry().checkpoints();
            if json {
                println!("{}", serde_json::to_string_pretty(table)?);
            } else if table.is_empty() {
                println!("no checkpoints on {}", params.network);
            } else {
                for (height, hash) in table.iter() {
                    println!("{height:>8}  {hash}");
                }
            }
        }
        Command::Estimate => {
            println!("{}", tracker.total_blocks_estimate());
        }
        Command::Check { height, hash } => {
            if tracker.check_hardened(height, &hash) {
                println!("ok");
            } else {
                println!("mismatch at height {height}");
                process::exit(1);
            }
        }
        Command::Params { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&*params)?);
            } else {
                println!("network:        {}", params.network);
                println!("genesis:        {}", params.genesis.hash);
                println!("merkle root:    {}", params.genesis.merkle_root);
                println!("p2p port:       {}", params.default_port);
                println!("rpc port:       {}", params.rpc_port);
                println!("checkpoints:    {}", params.checkpoints.len());
                println!("span:           {}", params.checkpoint_span);
            }
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}
