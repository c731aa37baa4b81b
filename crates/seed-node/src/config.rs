//! Node configuration.
//!
//! Provides [`NodeConfig`] with defaults for data directory, network, and
//! logging. The binary fills it from command-line flags.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use seed_core::constants::NetworkType;
use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Configuration for a node instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Network whose parameters and checkpoints are active.
    pub network: NetworkType,
    /// Root directory for all persistent data.
    pub data_dir: PathBuf,
    /// Log level filter string (e.g. "info", "debug", "seed_consensus=trace").
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_network(NetworkType::Mainnet)
    }
}

impl NodeConfig {
    /// Defaults for `network`, with the data directory under the platform
    /// data dir.
    pub fn for_network(network: NetworkType) -> Self {
        Self {
            network,
            data_dir: default_data_dir(network),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// `<platform data dir>/seedcoin`, plus the network suffix if it has one.
pub fn default_data_dir(network: NetworkType) -> PathBuf {
    let base = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("seedcoin");
    match network.data_dir_suffix() {
        Some(suffix) => base.join(suffix),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mainnet_info_text() {
        let cfg = NodeConfig::default();
        assert_eq!(cfg.network, NetworkType::Mainnet);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn mainnet_data_dir_has_no_suffix() {
        let cfg = NodeConfig::default();
        assert!(cfg.data_dir.ends_with("seedcoin"), "{:?}", cfg.data_dir);
    }

    #[test]
    fn testnet_data_dir_suffix() {
        let cfg = NodeConfig::for_network(NetworkType::Testnet);
        assert!(cfg.data_dir.ends_with("seedcoin/testnet"), "{:?}", cfg.data_dir);
    }

    #[test]
    fn log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn config_serializes() {
        let cfg = NodeConfig::for_network(NetworkType::Testnet);
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["network"], "testnet");
        assert_eq!(json["log_format"], "text");
    }
}
