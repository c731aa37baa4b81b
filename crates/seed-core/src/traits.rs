//! Trait interfaces between crates.
//!
//! - [`ChainView`]: read-only view of the block index and best tip, consumed
//!   by the checkpoint registry (seed-consensus). [`BlockIndex`](crate::block_index::BlockIndex)
//!   is the in-memory implementation.

use crate::block_index::{BlockId, BlockNode};
use crate::types::Hash256;

/// Read-only view of the block index.
///
/// Implementations must guarantee that a node's parent, if set, has a height
/// exactly one lower. Callers that share the index across threads hold the
/// owner's lock for the duration of a query.
pub trait ChainView {
    /// Resolve an identifier to its node.
    fn node(&self, id: BlockId) -> Option<&BlockNode>;

    /// Find the identifier of the node with `hash`.
    fn find(&self, hash: &Hash256) -> Option<BlockId>;

    /// Identifier of the current best tip, or `None` before genesis is known.
    fn best_tip(&self) -> Option<BlockId>;

    /// Look up a node by hash.
    ///
    /// Default implementation composes [`find`](Self::find) and [`node`](Self::node).
    fn node_by_hash(&self, hash: &Hash256) -> Option<&BlockNode> {
        self.find(hash).and_then(|id| self.node(id))
    }

    /// The best tip node.
    fn best_tip_node(&self) -> Option<&BlockNode> {
        self.best_tip().and_then(|id| self.node(id))
    }
}
