//! # seed-node-lib
//! Node configuration and the shared, lock-protected chain tracker that
//! enforces checkpoints on incoming blocks.

pub mod config;
pub mod tracker;

pub use config::{LogFormat, NodeConfig};
pub use tracker::{ChainTracker, SyncStatus};
