//! Shared chain tracking.
//!
//! [`ChainTracker`] owns the block index behind a `RwLock` and routes every
//! incoming block through the [`BlockAcceptor`]. Checkpoint queries take a
//! read lock, so sync reporting and validation can run concurrently with
//! each other; block acceptance takes the write lock.

use std::sync::Arc;

use parking_lot::RwLock;
use seed_consensus::{AcceptOutcome, BlockAcceptor, CheckpointRegistry};
use seed_core::block_index::BlockIndex;
use seed_core::error::{BlockError, SeedError};
use seed_core::params::ChainParams;
use seed_core::traits::ChainView;
use seed_core::types::Hash256;
use serde::Serialize;
use tracing::info;

/// Snapshot of chain progress relative to the checkpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub tip_height: u64,
    pub tip_hash: Hash256,
    pub sync_checkpoint_height: u64,
    pub total_blocks_estimate: u64,
    /// Height of the highest checkpointed block we hold, if any.
    pub last_checkpoint_height: Option<u64>,
}

/// Thread-safe block index with checkpoint enforcement.
///
/// Cloning is cheap; clones share the same index.
#[derive(Clone)]
pub struct ChainTracker {
    params: Arc<ChainParams>,
    acceptor: BlockAcceptor,
    index: Arc<RwLock<BlockIndex>>,
}

impl ChainTracker {
    /// Validate `params` and start a chain holding only the genesis block.
    pub fn new(params: Arc<ChainParams>) -> Result<Self, SeedError> {
        params.validate()?;
        let registry = CheckpointRegistry::from_params(&params);
        let index = BlockIndex::with_genesis(params.genesis.hash);
        info!(
            network = %params.network,
            genesis = %params.genesis.hash,
            checkpoints = registry.checkpoints().len(),
            span = registry.span(),
            "chain tracker initialized"
        );
        Ok(Self {
            params,
            acceptor: BlockAcceptor::new(registry),
            index: Arc::new(RwLock::new(index)),
        })
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn registry(&self) -> &CheckpointRegistry {
        self.acceptor.registry()
    }

    /// Offer a block to the index.
    pub fn accept_block(
        &self,
        hash: Hash256,
        parent: &Hash256,
    ) -> Result<AcceptOutcome, BlockError> {
        let mut index = self.index.write();
        let outcome = self.acceptor.accept(&mut index, hash, parent)?;
        if outcome.new_tip {
            info!(height = outcome.height, %hash, "new best tip");
        }
        Ok(outcome)
    }

    /// Current best tip as `(height, hash)`.
    pub fn best_tip(&self) -> Option<(u64, Hash256)> {
        let index = self.index.read();
        index.best_tip_node().map(|n| (n.height, n.hash))
    }

    pub fn check_hardened(&self, height: u64, hash: &Hash256) -> bool {
        self.registry().check_hardened(height, hash)
    }

    pub fn total_blocks_estimate(&self) -> u64 {
        self.registry().total_blocks_estimate()
    }

    /// Highest checkpointed block held, as `(height, hash)`.
    pub fn last_checkpoint(&self) -> Option<(u64, Hash256)> {
        let index = self.index.read();
        self.registry()
            .last_checkpoint(&*index)
            .map(|n| (n.height, n.hash))
    }

    /// Current sync checkpoint as `(height, hash)`.
    pub fn sync_checkpoint(&self) -> Option<(u64, Hash256)> {
        let index = self.index.read();
        self.registry()
            .auto_select_sync_checkpoint(&*index)
            .map(|n| (n.height, n.hash))
    }

    pub fn check_sync(&self, height: u64) -> bool {
        let index = self.index.read();
        self.registry().check_sync(&*index, height)
    }

    /// Consistent snapshot taken under a single read lock.
    pub fn status(&self) -> SyncStatus {
        let index = self.index.read();
        let registry = self.registry();
        let (tip_height, tip_hash) = index
            .best_tip_node()
            .map(|n| (n.height, n.hash))
            .unwrap_or((0, Hash256::ZERO));
        SyncStatus {
            tip_height,
            tip_hash,
            sync_checkpoint_height: registry
                .auto_select_sync_checkpoint(&*index)
                .map(|n| n.height)
                .unwrap_or(0),
            total_blocks_estimate: registry.total_blocks_estimate(),
            last_checkpoint_height: registry.last_checkpoint(&*index).map(|n| n.height),
        }
    }

    /// Number of blocks in the index, side branches included.
    pub fn block_count(&self) -> usize {
        self.index.read().len()
    }
}
