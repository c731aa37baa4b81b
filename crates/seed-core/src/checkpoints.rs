//! Compiled-in checkpoint tables.
//!
//! A checkpoint pins the block hash at a given height. Any chain that carries
//! a different block at a checkpointed height is invalid, regardless of its
//! accumulated work.
//!
//! What makes a good checkpoint block:
//! - it is surrounded by blocks with reasonable timestamps (no earlier block
//!   with a later timestamp, no later block with an earlier one)
//! - it contains no unusual transactions
//!
//! The testnet table is empty on purpose: test networks carry no hardened
//! trust anchors, so every height is unconstrained there.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::NetworkType;
use crate::error::ParamsError;
use crate::types::Hash256;

/// Mainnet checkpoints as `(height, hash)` literals.
pub const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[
    (0, "0x0000001ce91d2acda7b3d67fb5f0df3650ecff20faa107f349f25bd4e07d7add"),
    (1, "0x1edab580a94c28941b8741a19c02f48b0a8f3de04e57d5993a01f650c2fd7324"),
    (2, "0x2b501142dd663f02e15b40199fc3fc4a007b1851572ae6e911bfeca2532e6fb8"),
    (3, "0x0a8fed25366dac940f24c487a0534a484b52cdce8c85f862325df1dbb250c672"),
    (4, "0xc431f7ac70aae163a4e0605e98c65f89dee6d4cb190f7c42b686fa8653ccd11d"),
    (5, "0x46f7773ede99e040c8ed150a0a0f1d7012c5ba4b6762ea3223c4d6104d41c8a2"),
    (6, "0x7a8aa14c0033af9bfda495da9274fc7fe992d657e9ce2875bee38466b786c4dd"),
    (7, "0xb8968e645b2af67ee194e466c2da0769de9a85ac450983d402a22f9be89af331"),
    (8, "0x001583f14eedb949dbcd98fc383e12647bf90a0fb3489a5ecf9a21aba73a86ce"),
    (9, "0x958270aa2b6b8bff84886b9746aac14b5ea111177798077d2bb390f99077fad8"),
    (10, "0xb874688d8c6c4cc7354ea2dca58cd4b8bf383d20e0636ba14d528ece59c2fdf8"),
];

/// Testnet checkpoints. Intentionally empty.
pub const TESTNET_CHECKPOINTS: &[(u64, &str)] = &[];

/// An immutable height → hash map of trusted blocks.
///
/// Iteration is in ascending height order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckpointTable(BTreeMap<u64, Hash256>);

impl CheckpointTable {
    /// A table with no checkpoints.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a table from `(height, hash)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::DuplicateCheckpoint`] if a height appears twice.
    pub fn from_entries<I>(entries: I) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = (u64, Hash256)>,
    {
        let mut map = BTreeMap::new();
        for (height, hash) in entries {
            if map.insert(height, hash).is_some() {
                return Err(ParamsError::DuplicateCheckpoint(height));
            }
        }
        Ok(Self(map))
    }

    /// Build a table from hex literals such as [`MAINNET_CHECKPOINTS`].
    pub fn from_hex_entries(entries: &[(u64, &str)]) -> Result<Self, ParamsError> {
        let parsed = entries
            .iter()
            .map(|&(height, hex)| {
                Hash256::from_hex(hex)
                    .map(|hash| (height, hash))
                    .map_err(|source| ParamsError::InvalidCheckpoint { height, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(parsed)
    }

    /// The compiled-in table for `network`.
    pub fn for_network(network: NetworkType) -> Result<Self, ParamsError> {
        match network {
            NetworkType::Mainnet => Self::from_hex_entries(MAINNET_CHECKPOINTS),
            NetworkType::Testnet => Self::from_hex_entries(TESTNET_CHECKPOINTS),
        }
    }

    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.0.get(&height)
    }

    /// Highest checkpointed height, or `None` for an empty table.
    pub fn max_height(&self) -> Option<u64> {
        self.0.keys().next_back().copied()
    }

    /// Entries in ascending height order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u64, &Hash256)> + '_ {
        self.0.iter().map(|(h, hash)| (*h, hash))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_table_parses() {
        let table = CheckpointTable::for_network(NetworkType::Mainnet).unwrap();
        assert_eq!(table.len(), MAINNET_CHECKPOINTS.len());
        assert_eq!(table.max_height(), Some(10));
        assert_eq!(
            table.get(0).unwrap().to_string(),
            "0000001ce91d2acda7b3d67fb5f0df3650ecff20faa107f349f25bd4e07d7add"
        );
    }

    #[test]
    fn testnet_table_is_empty() {
        let table = CheckpointTable::for_network(NetworkType::Testnet).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_height(), None);
    }

    #[test]
    fn iteration_is_ascending_and_reversible() {
        let table = CheckpointTable::from_entries([
            (20, Hash256([2; 32])),
            (5, Hash256([1; 32])),
            (300, Hash256([3; 32])),
        ])
        .unwrap();
        let heights: Vec<u64> = table.iter().map(|(h, _)| h).collect();
        assert_eq!(heights, vec![5, 20, 300]);
        let rev: Vec<u64> = table.iter().rev().map(|(h, _)| h).collect();
        assert_eq!(rev, vec![300, 20, 5]);
    }

    #[test]
    fn duplicate_height_rejected() {
        let err = CheckpointTable::from_entries([(7, Hash256([1; 32])), (7, Hash256([2; 32]))])
            .unwrap_err();
        assert_eq!(err, ParamsError::DuplicateCheckpoint(7));
    }

    #[test]
    fn bad_hex_reports_height() {
        let err = CheckpointTable::from_hex_entries(&[(0, "0x00"), (4, "nothex")]).unwrap_err();
        assert!(matches!(err, ParamsError::InvalidCheckpoint { height: 0, .. }));
    }

    #[test]
    fn serializes_as_height_map() {
        let table = CheckpointTable::from_entries([(1, Hash256([0x11; 32]))]).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["1"], "11".repeat(32));
    }
}
