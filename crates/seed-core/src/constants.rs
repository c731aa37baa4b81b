//! Protocol constants and network identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Number of blocks the automatic sync checkpoint lags behind the best tip.
///
/// Blocks at or below `tip_height - CHECKPOINT_SPAN` are treated as settled
/// history and cannot be replaced by a competing chain.
pub const CHECKPOINT_SPAN: u64 = 5000;

/// Last height at which proof-of-work blocks are accepted.
pub const LAST_POW_BLOCK: u64 = 20_000;

/// First height at which proof-of-stake blocks are accepted.
pub const POS_START_BLOCK: u64 = 201;

pub const DEFAULT_P2P_PORT: u16 = 31821;
pub const DEFAULT_RPC_PORT: u16 = 31820;

/// Network identity: Mainnet or Testnet.
///
/// Selects magic bytes, default ports, data directory, genesis block, and
/// which checkpoint table is active.
///
/// # Examples
///
/// ```
/// use seed_core::constants::NetworkType;
/// let net: NetworkType = "testnet".parse().unwrap();
/// assert_eq!(net, NetworkType::Testnet);
/// assert!("regtest".parse::<NetworkType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network. Carries no hardened checkpoints.
    Testnet,
}

impl NetworkType {
    /// Four-byte message-start marker prepended to all P2P messages.
    pub fn magic_bytes(&self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0xf1, 0xec, 0xa1, 0xc7],
            Self::Testnet => [0x5f, 0xa2, 0xd2, 0xda],
        }
    }

    /// Default TCP port for P2P connections.
    pub fn default_p2p_port(&self) -> u16 {
        match self {
            Self::Mainnet => DEFAULT_P2P_PORT,
            Self::Testnet => 55555,
        }
    }

    /// Default TCP port for the RPC server.
    pub fn default_rpc_port(&self) -> u16 {
        match self {
            Self::Mainnet => DEFAULT_RPC_PORT,
            Self::Testnet => 55556,
        }
    }

    /// Subdirectory appended to the base data directory, if any.
    ///
    /// Mainnet data lives directly in the base directory.
    pub fn data_dir_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Mainnet => None,
            Self::Testnet => Some("testnet"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Self::Mainnet),
            "test" | "testnet" => Ok(Self::Testnet),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}
