//! Block acceptance gate.
//!
//! Applies the checkpoint rules when a block header is offered to the index:
//! the parent must be known, the block must agree with any hardened
//! checkpoint at its height, and its height must lie above the current sync
//! checkpoint. Accepted blocks are inserted and become the best tip when they
//! extend past it.
//!
//! The acceptor does not validate proof-of-work or transactions; callers run
//! those checks separately.

use seed_core::block_index::{BlockId, BlockIndex};
use seed_core::error::BlockError;
use seed_core::traits::ChainView;
use seed_core::types::Hash256;
use tracing::{debug, warn};

use crate::checkpoint::CheckpointRegistry;

/// Result of accepting a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptOutcome {
    pub id: BlockId,
    pub height: u64,
    /// Whether the block became the new best tip.
    pub new_tip: bool,
}

/// Checkpoint-enforcing front door to a [`BlockIndex`].
#[derive(Clone, Debug)]
pub struct BlockAcceptor {
    registry: CheckpointRegistry,
}

impl BlockAcceptor {
    pub fn new(registry: CheckpointRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CheckpointRegistry {
        &self.registry
    }

    /// Check a candidate block without inserting it. Returns its height.
    ///
    /// # Errors
    ///
    /// - [`BlockError::DuplicateBlock`] if `hash` is already indexed
    /// - [`BlockError::UnknownParent`] if `parent` is not indexed
    /// - [`BlockError::CheckpointMismatch`] if a hardened checkpoint disagrees
    /// - [`BlockError::BelowSyncCheckpoint`] if the height is already settled
    pub fn check<C>(&self, chain: &C, hash: &Hash256, parent: &Hash256) -> Result<u64, BlockError>
    where
        C: ChainView + ?Sized,
    {
        if chain.find(hash).is_some() {
            return Err(BlockError::DuplicateBlock(hash.to_string()));
        }
        let parent_node = chain
            .node_by_hash(parent)
            .ok_or_else(|| BlockError::UnknownParent(parent.to_string()))?;
        let height = parent_node
            .height
            .checked_add(1)
            .ok_or_else(|| BlockError::HeightOverflow(parent.to_string()))?;

        if !self.registry.check_hardened(height, hash) {
            let expected = self
                .registry
                .checkpoints()
                .get(height)
                .map(ToString::to_string)
                .unwrap_or_default();
            warn!(height, %hash, %expected, "rejected by hardened checkpoint");
            return Err(BlockError::CheckpointMismatch {
                height,
                got: hash.to_string(),
                expected,
            });
        }

        // Same rule as `CheckpointRegistry::check_sync`.
        if let Some(sync) = self.registry.auto_select_sync_checkpoint(chain) {
            if height <= sync.height {
                let sync_height = sync.height;
                warn!(height, sync_height, %hash, "rejected by sync checkpoint");
                return Err(BlockError::BelowSyncCheckpoint { height, sync_height });
            }
        }

        Ok(height)
    }

    /// Check and insert a block, advancing the best tip if it is higher.
    pub fn accept(
        &self,
        index: &mut BlockIndex,
        hash: Hash256,
        parent: &Hash256,
    ) -> Result<AcceptOutcome, BlockError> {
        let height = self.check(&*index, &hash, parent)?;
        let id = index.insert(hash, parent)?;

        let tip_height = index.best_tip_node().map(|n| n.height);
        let new_tip = tip_height.is_none_or(|tip| height > tip);
        if new_tip {
            index.set_best_tip(id)?;
        }
        debug!(height, %hash, new_tip, "block accepted");
        Ok(AcceptOutcome { id, height, new_tip })
    }
}
