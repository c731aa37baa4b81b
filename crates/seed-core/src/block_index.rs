//! In-memory block index.
//!
//! Nodes live in an arena and refer to their parent by [`BlockId`], so walks
//! toward genesis are plain identifier lookups. Heights are derived from the
//! parent on insert and never supplied by callers.
//!
//! Not thread-safe; the chain tracker wraps it in a `RwLock`.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::ChainIndexError;
use crate::traits::ChainView;
use crate::types::Hash256;

/// Stable arena index of a [`BlockNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockId(pub usize);

/// One block in the index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    pub hash: Hash256,
    pub height: u64,
    /// `None` only for genesis.
    pub parent: Option<BlockId>,
}

/// Arena of block nodes keyed by hash, plus the best-tip reference.
#[derive(Debug, Default)]
pub struct BlockIndex {
    nodes: Vec<BlockNode>,
    by_hash: HashMap<Hash256, BlockId>,
    best_tip: Option<BlockId>,
}

impl BlockIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index holding only `genesis`, which is also the best tip.
    pub fn with_genesis(genesis: Hash256) -> Self {
        let mut index = Self::new();
        let id = index.push(genesis, 0, None);
        index.best_tip = Some(id);
        index
    }

    /// Insert a block on top of `parent`. Does not move the best tip.
    ///
    /// # Errors
    ///
    /// - [`ChainIndexError::DuplicateBlock`] if `hash` is already indexed
    /// - [`ChainIndexError::UnknownParent`] if `parent` is not indexed
    pub fn insert(&mut self, hash: Hash256, parent: &Hash256) -> Result<BlockId, ChainIndexError> {
        if self.by_hash.contains_key(&hash) {
            return Err(ChainIndexError::DuplicateBlock(hash.to_string()));
        }
        let parent_id = self
            .find(parent)
            .ok_or_else(|| ChainIndexError::UnknownParent(parent.to_string()))?;
        let height = self.nodes[parent_id.0]
            .height
            .checked_add(1)
            .ok_or_else(|| ChainIndexError::HeightOverflow(parent.to_string()))?;
        Ok(self.push(hash, height, Some(parent_id)))
    }

    fn push(&mut self, hash: Hash256, height: u64, parent: Option<BlockId>) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes.push(BlockNode { hash, height, parent });
        self.by_hash.insert(hash, id);
        id
    }

    /// Move the best-tip reference.
    pub fn set_best_tip(&mut self, id: BlockId) -> Result<(), ChainIndexError> {
        if id.0 >= self.nodes.len() {
            return Err(ChainIndexError::BlockNotFound(format!("#{}", id.0)));
        }
        self.best_tip = Some(id);
        Ok(())
    }

    /// Ancestor of `id` at `height`, walking parent links.
    ///
    /// Returns `None` if `height` is above the node's own height.
    pub fn ancestor_at(&self, id: BlockId, height: u64) -> Option<BlockId> {
        let mut current = id;
        loop {
            let node = self.node(current)?;
            if node.height == height {
                return Some(current);
            }
            if node.height < height {
                return None;
            }
            current = node.parent?;
        }
    }

    pub fn contains(&self, hash: &Hash256) -> bool {
        self.by_hash.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ChainView for BlockIndex {
    fn node(&self, id: BlockId) -> Option<&BlockNode> {
        self.nodes.get(id.0)
    }

    fn find(&self, hash: &Hash256) -> Option<BlockId> {
        self.by_hash.get(hash).copied()
    }

    fn best_tip(&self) -> Option<BlockId> {
        self.best_tip
    }
}
