//! Per-network chain parameters.
//!
//! [`ChainParams`] is built once at startup for the selected network and then
//! shared read-only (typically behind an `Arc`) by every component that needs
//! it. There is no process-wide "current network" switch.

use serde::Serialize;

use crate::checkpoints::CheckpointTable;
use crate::constants::{CHECKPOINT_SPAN, LAST_POW_BLOCK, NetworkType, POS_START_BLOCK};
use crate::error::ParamsError;
use crate::merkle::{merkle_root, push_script_data, write_compact_size};
use crate::types::Hash256;

/// Version bytes for base58-encoded keys and addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: u8,
    pub script_address: u8,
    pub secret_key: u8,
    pub stealth_address: u8,
    pub ext_public_key: [u8; 4],
    pub ext_secret_key: [u8; 4],
}

/// A coinbase transaction of the genesis block.
///
/// One input spending the null outpoint with script
/// `OP_0 <42> <message>`, and one empty output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenesisCoinbase {
    /// Transaction timestamp.
    pub time: u32,
    /// Message embedded in the input script.
    pub message: &'static str,
}

impl GenesisCoinbase {
    const TX_VERSION: u32 = 1;

    /// Wire serialization of the transaction.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut script_sig = vec![0x00];
        push_script_data(&mut script_sig, &[42]);
        push_script_data(&mut script_sig, self.message.as_bytes());

        let mut out = Vec::with_capacity(96 + script_sig.len());
        out.extend_from_slice(&Self::TX_VERSION.to_le_bytes());
        out.extend_from_slice(&self.time.to_le_bytes());
        // inputs: null prevout
        write_compact_size(&mut out, 1);
        out.extend_from_slice(&[0u8; 32]);
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        write_compact_size(&mut out, script_sig.len() as u64);
        out.extend_from_slice(&script_sig);
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        // outputs: value 0, empty script
        write_compact_size(&mut out, 1);
        out.extend_from_slice(&0i64.to_le_bytes());
        write_compact_size(&mut out, 0);
        // lock time
        out.extend_from_slice(&0u32.to_le_bytes());
        out
    }

    /// Transaction id in wire byte order.
    pub fn txid(&self) -> Hash256 {
        Hash256::digest(&self.to_bytes())
    }
}

/// Identity of the genesis block.
///
/// The hash and merkle root are compiled-in constants. [`ChainParams::validate`]
/// recomputes the merkle root from `coinbases` and checks the hash against the
/// checkpoint table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenesisParams {
    pub hash: Hash256,
    pub merkle_root: Hash256,
    /// Unix timestamp of the genesis block header.
    pub timestamp: u32,
    /// Compact difficulty bits.
    pub bits: u32,
    pub nonce: u32,
    /// Genesis transactions, in block order.
    ///
    /// The testnet block also carries the mainnet coinbase ahead of its own.
    pub coinbases: Vec<GenesisCoinbase>,
}

impl GenesisParams {
    /// Merkle root of `coinbases`, in display byte order.
    pub fn compute_merkle_root(&self) -> Hash256 {
        let txids: Vec<Hash256> = self.coinbases.iter().map(GenesisCoinbase::txid).collect();
        merkle_root(&txids).reversed()
    }
}

const MAINNET_COINBASE: GenesisCoinbase = GenesisCoinbase {
    time: 1_531_241_978,
    message: "Seedcoin offically starts in July 2018 XSD.",
};

const TESTNET_COINBASE: GenesisCoinbase = GenesisCoinbase {
    time: 1_508_981_174,
    message: "Seedcoin start July 2018 XSD Testnet.",
};

/// Immutable parameters for one network.
#[derive(Clone, Debug, Serialize)]
pub struct ChainParams {
    pub network: NetworkType,
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub rpc_port: u16,
    pub genesis: GenesisParams,
    pub base58: Base58Prefixes,
    pub dns_seeds: Vec<&'static str>,
    pub last_pow_block: u64,
    pub pos_start_block: u64,
    pub checkpoints: CheckpointTable,
    /// Lag of the automatic sync checkpoint behind the best tip, in blocks.
    pub checkpoint_span: u64,
}

fn genesis_hash(hex: &str) -> Result<Hash256, ParamsError> {
    Hash256::from_hex(hex).map_err(ParamsError::InvalidGenesis)
}

impl ChainParams {
    /// Build and validate the parameters for `network`.
    ///
    /// # Errors
    ///
    /// Fails if a compiled-in constant does not parse or the genesis hash
    /// disagrees with the height-0 checkpoint.
    pub fn for_network(network: NetworkType) -> Result<Self, ParamsError> {
        let params = match network {
            NetworkType::Mainnet => Self::mainnet()?,
            NetworkType::Testnet => Self::testnet()?,
        };
        params.validate()?;
        Ok(params)
    }

    fn mainnet() -> Result<Self, ParamsError> {
        Ok(Self {
            network: NetworkType::Mainnet,
            message_start: NetworkType::Mainnet.magic_bytes(),
            default_port: NetworkType::Mainnet.default_p2p_port(),
            rpc_port: NetworkType::Mainnet.default_rpc_port(),
            genesis: GenesisParams {
                hash: genesis_hash(
                    "0x0000001ce91d2acda7b3d67fb5f0df3650ecff20faa107f349f25bd4e07d7add",
                )?,
                merkle_root: genesis_hash(
                    "0x74545301a822769877304ef501d585a34383cc9cab781d67ef54e63719f59395",
                )?,
                timestamp: 1_531_241_978,
                bits: 520_159_231,
                nonce: 32_129_122,
                coinbases: vec![MAINNET_COINBASE],
            },
            base58: Base58Prefixes {
                pubkey_address: 63,
                script_address: 85,
                secret_key: 153,
                stealth_address: 40,
                ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
                ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
            },
            dns_seeds: vec![
                "seed1.seed-coin.io",
                "seed2.seed-coin.io",
                "seedcoin.talium.tech",
            ],
            last_pow_block: LAST_POW_BLOCK,
            pos_start_block: POS_START_BLOCK,
            checkpoints: CheckpointTable::for_network(NetworkType::Mainnet)?,
            checkpoint_span: CHECKPOINT_SPAN,
        })
    }

    fn testnet() -> Result<Self, ParamsError> {
        Ok(Self {
            network: NetworkType::Testnet,
            message_start: NetworkType::Testnet.magic_bytes(),
            default_port: NetworkType::Testnet.default_p2p_port(),
            rpc_port: NetworkType::Testnet.default_rpc_port(),
            genesis: GenesisParams {
                hash: genesis_hash(
                    "0x00000e64acb332d8ac41ffb77ccb69695673fcca79b025c8e9fb4a4109497c2e",
                )?,
                merkle_root: genesis_hash(
                    "0x0da0cfdf44f125b502aca510de32be8bcf1adeca9a4298eb9a675f37bc8aab77",
                )?,
                timestamp: 1_508_981_174,
                bits: 520_159_231,
                nonce: 270_991,
                coinbases: vec![MAINNET_COINBASE, TESTNET_COINBASE],
            },
            base58: Base58Prefixes {
                pubkey_address: 125,
                script_address: 196,
                secret_key: 239,
                stealth_address: 40,
                ext_public_key: [0x04, 0x35, 0x87, 0xCF],
                ext_secret_key: [0x04, 0x35, 0x83, 0x94],
            },
            dns_seeds: Vec::new(),
            last_pow_block: LAST_POW_BLOCK,
            pos_start_block: POS_START_BLOCK,
            checkpoints: CheckpointTable::for_network(NetworkType::Testnet)?,
            checkpoint_span: CHECKPOINT_SPAN,
        })
    }

    /// Startup sanity check.
    ///
    /// The recomputed genesis merkle root must equal the compiled-in one, and a
    /// height-0 checkpoint must be the genesis block.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let computed = self.genesis.compute_merkle_root();
        if computed != self.genesis.merkle_root {
            return Err(ParamsError::GenesisMerkleMismatch {
                computed: computed.to_string(),
                expected: self.genesis.merkle_root.to_string(),
            });
        }
        match self.checkpoints.get(0) {
            Some(cp) if *cp != self.genesis.hash => {
                Err(ParamsError::GenesisCheckpointMismatch {
                    checkpoint: cp.to_string(),
                    genesis: self.genesis.hash.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
