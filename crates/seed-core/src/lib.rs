//! # seed-core
//! Foundation types for the Seedcoin checkpoint subsystem: hashes, network
//! parameters, genesis merkle recomputation, compiled-in checkpoint tables, and
//! the block index arena.

pub mod block_index;
pub mod checkpoints;
pub mod constants;
pub mod error;
pub mod merkle;
pub mod params;
pub mod traits;
pub mod types;
