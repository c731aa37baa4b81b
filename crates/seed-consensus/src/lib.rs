//! # seed-consensus: checkpoint enforcement.
//!
//! [`CheckpointRegistry`] answers the checkpoint queries against the active
//! network's table; [`BlockAcceptor`] applies them when a new block header is
//! offered to the index.

pub mod acceptor;
pub mod checkpoint;

pub use acceptor::{AcceptOutcome, BlockAcceptor};
pub use checkpoint::CheckpointRegistry;
