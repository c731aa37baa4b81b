//! Shared chain builders for integration tests.

use seed_core::block_index::{BlockId, BlockIndex};
use seed_core::types::Hash256;

/// Deterministic hash for block `height` on branch `branch`.
///
/// Branch 0 is the main chain; other values give distinct fork hashes at the
/// same heights.
pub fn block_hash(branch: u8, height: u64) -> Hash256 {
    let mut data = [0u8; 9];
    data[0] = branch;
    data[1..].copy_from_slice(&height.to_le_bytes());
    Hash256::digest(&data)
}

/// Main-chain index from genesis through `tip`, with the tip as best tip.
pub fn linear_chain(tip: u64) -> BlockIndex {
    let mut index = BlockIndex::with_genesis(block_hash(0, 0));
    extend_branch(&mut index, 0, 0, tip);
    index
}

/// Linear chain whose genesis hash is `genesis` instead of the synthetic one.
pub fn linear_chain_from(genesis: Hash256, tip: u64) -> BlockIndex {
    let mut index = BlockIndex::with_genesis(genesis);
    let mut parent = genesis;
    let mut last = None;
    for height in 1..=tip {
        let hash = block_hash(0, height);
        last = Some(index.insert(hash, &parent).expect("fresh hash"));
        parent = hash;
    }
    if let Some(id) = last {
        index.set_best_tip(id).expect("inserted id");
    }
    index
}

/// Append `branch` blocks from the node at `from_height` on the main chain
/// up to `to_height`, and make the last one the best tip.
///
/// Returns the id of the last inserted block, or `None` if nothing was added.
pub fn extend_branch(
    index: &mut BlockIndex,
    branch: u8,
    from_height: u64,
    to_height: u64,
) -> Option<BlockId> {
    let mut parent = block_hash(0, from_height);
    let mut last = None;
    for height in from_height + 1..=to_height {
        let hash = block_hash(branch, height);
        last = Some(index.insert(hash, &parent).expect("fresh hash"));
        parent = hash;
    }
    if let Some(id) = last {
        index.set_best_tip(id).expect("inserted id");
    }
    last
}
