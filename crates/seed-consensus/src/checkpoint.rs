//! Checkpoint registry.
//!
//! Two kinds of checkpoint protect the chain:
//!
//! - **Hardened checkpoints** are compiled into the binary per network. A
//!   block at a checkpointed height must carry the recorded hash, whatever
//!   the work behind a competing chain.
//! - The **sync checkpoint** is selected automatically: the ancestor of the
//!   best tip that lags it by at least `span` blocks (or genesis on a shorter
//!   chain). Blocks at or below its height are settled history.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** an attacker with enough hash power could rebuild
//!   deep history. The sync checkpoint caps how far back any reorg may reach,
//!   and hardened checkpoints pin the oldest blocks outright.
//! - **Low-difficulty alternate chain during initial sync:** the hardened
//!   table rejects a fake early chain at the first checkpointed height.
//!
//! The registry holds only its immutable table, so it is `Send + Sync` and
//! needs no locking. Chain state is passed in through [`ChainView`]; callers
//! that share the index hold its lock while querying.

use seed_core::block_index::BlockNode;
use seed_core::checkpoints::CheckpointTable;
use seed_core::params::ChainParams;
use seed_core::traits::ChainView;
use seed_core::types::Hash256;
use tracing::debug;

/// Checkpoint table of the active network plus the sync-checkpoint span.
#[derive(Clone, Debug)]
pub struct CheckpointRegistry {
    checkpoints: CheckpointTable,
    span: u64,
}

impl CheckpointRegistry {
    pub fn new(checkpoints: CheckpointTable, span: u64) -> Self {
        Self { checkpoints, span }
    }

    /// Registry for the network described by `params`.
    pub fn from_params(params: &ChainParams) -> Self {
        Self::new(params.checkpoints.clone(), params.checkpoint_span)
    }

    pub fn checkpoints(&self) -> &CheckpointTable {
        &self.checkpoints
    }

    pub fn span(&self) -> u64 {
        self.span
    }

    /// Verify `hash` against the hardened checkpoint at `height`.
    ///
    /// Heights without a checkpoint are unconstrained and always pass.
    pub fn check_hardened(&self, height: u64, hash: &Hash256) -> bool {
        match self.checkpoints.get(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    /// Height of the highest checkpoint, or 0 if the table is empty.
    ///
    /// A lower bound on the chain height before sync completes.
    pub fn total_blocks_estimate(&self) -> u64 {
        self.checkpoints.max_height().unwrap_or(0)
    }

    /// The highest checkpointed block present in `chain`.
    ///
    /// Scans from the highest checkpoint down and returns the first whose
    /// hash is indexed. `None` if no checkpointed block has arrived yet.
    pub fn last_checkpoint<'a, C>(&self, chain: &'a C) -> Option<&'a BlockNode>
    where
        C: ChainView + ?Sized,
    {
        self.checkpoints
            .iter()
            .rev()
            .find_map(|(_, hash)| chain.node_by_hash(hash))
    }

    /// Select the sync checkpoint for the current best tip.
    ///
    /// Walks parent links from the tip while `node.height + span > tip.height`
    /// and a parent exists. The result is the first ancestor at least `span`
    /// blocks behind the tip, or genesis when the chain is shorter than
    /// `span`. `None` only when the chain has no tip.
    pub fn auto_select_sync_checkpoint<'a, C>(&self, chain: &'a C) -> Option<&'a BlockNode>
    where
        C: ChainView + ?Sized,
    {
        let tip = chain.best_tip_node()?;
        let mut current = tip;
        while current.height.saturating_add(self.span) > tip.height {
            let Some(parent) = current.parent.and_then(|id| chain.node(id)) else {
                break;
            };
            current = parent;
        }
        Some(current)
    }

    /// Whether a block at `height` lies above the sync checkpoint.
    ///
    /// Returns `false` for heights at or below the sync checkpoint. With no
    /// best tip nothing is settled yet, so every height passes.
    pub fn check_sync<C>(&self, chain: &C, height: u64) -> bool
    where
        C: ChainView + ?Sized,
    {
        let Some(sync) = self.auto_select_sync_checkpoint(chain) else {
            return true;
        };
        if height <= sync.height {
            debug!(height, sync_height = sync.height, "height at or below sync checkpoint");
            return false;
        }
        true
    }
}
