//! Adversarial chain-acceptance tests.
//!
//! Attack vectors tested:
//! - Fake early history diverging at a hardened checkpoint
//! - Deep reorg attempts at or below the sync checkpoint
//! - Shallow competing branches inside the span (must stay allowed)
//! - Concurrent readers while blocks are being accepted

use std::sync::Arc;
use std::thread;

use seed_core::constants::{CHECKPOINT_SPAN, NetworkType};
use seed_core::error::BlockError;
use seed_core::params::ChainParams;
use seed_core::types::Hash256;
use seed_node_lib::ChainTracker;
use seed_tests::helpers::block_hash;

fn tracker(network: NetworkType) -> ChainTracker {
    ChainTracker::new(Arc::new(ChainParams::for_network(network).unwrap())).unwrap()
}

/// Extend the tracker's best tip with `count` blocks on `branch`.
fn mine(tracker: &ChainTracker, branch: u8, count: u64) {
    for _ in 0..count {
        let (height, parent) = tracker.best_tip().unwrap();
        tracker
            .accept_block(block_hash(branch, height + 1), &parent)
            .unwrap();
    }
}

/// Build a branch of `len` blocks on top of `parent` at `parent_height`,
/// stopping at the first rejection.
fn build_fork(
    tracker: &ChainTracker,
    branch: u8,
    mut parent: Hash256,
    parent_height: u64,
    len: u64,
) -> Result<(), BlockError> {
    for height in parent_height + 1..=parent_height + len {
        let hash = block_hash(branch, height);
        tracker.accept_block(hash, &parent)?;
        parent = hash;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Hardened checkpoints
// ---------------------------------------------------------------------------

#[test]
fn fake_early_chain_rejected_at_first_checkpoint() {
    let t = tracker(NetworkType::Mainnet);
    let genesis = t.params().genesis.hash;

    let err = build_fork(&t, 1, genesis, 0, 20).unwrap_err();
    match err {
        BlockError::CheckpointMismatch { height, expected, .. } => {
            assert_eq!(height, 1);
            assert_eq!(expected, t.params().checkpoints.get(1).unwrap().to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(t.block_count(), 1);
    assert_eq!(t.best_tip(), Some((0, genesis)));
}

#[test]
fn real_checkpoints_then_free_chain() {
    let t = tracker(NetworkType::Mainnet);
    let mut parent = t.params().genesis.hash;
    for height in 1..=10 {
        let hash = *t.params().checkpoints.get(height).unwrap();
        t.accept_block(hash, &parent).unwrap();
        parent = hash;
    }
    assert_eq!(t.last_checkpoint().unwrap().0, 10);

    mine(&t, 0, 5);
    assert_eq!(t.best_tip().unwrap().0, 15);
    assert_eq!(t.status().last_checkpoint_height, Some(10));
}

#[test]
fn testnet_has_no_hardened_anchor() {
    let t = tracker(NetworkType::Testnet);
    let genesis = t.params().genesis.hash;
    build_fork(&t, 1, genesis, 0, 20).unwrap();
    build_fork(&t, 2, genesis, 0, 20).unwrap();
    assert_eq!(t.block_count(), 41);
}

// ---------------------------------------------------------------------------
// Sync checkpoint
// ---------------------------------------------------------------------------

#[test]
fn deep_reorg_below_sync_checkpoint_rejected() {
    let t = tracker(NetworkType::Testnet);
    mine(&t, 0, CHECKPOINT_SPAN + 100);
    let sync_height = t.sync_checkpoint().unwrap().0;
    assert_eq!(sync_height, 100);

    // Fork from height 99: its first block lands on the settled height 100.
    let fork_parent = block_hash(0, 99);
    let err = build_fork(&t, 7, fork_parent, 99, 10).unwrap_err();
    assert_eq!(err, BlockError::BelowSyncCheckpoint { height: 100, sync_height: 100 });
    assert!(!t.check_sync(100));
    assert!(t.check_sync(101));
}

#[test]
fn shallow_fork_above_sync_checkpoint_allowed() {
    let t = tracker(NetworkType::Testnet);
    mine(&t, 0, CHECKPOINT_SPAN + 100);
    let tip_before = t.best_tip().unwrap();

    // Fork from height 100 (the sync checkpoint itself) is permitted.
    build_fork(&t, 8, block_hash(0, 100), 100, 50).unwrap();
    assert_eq!(t.best_tip(), Some(tip_before));
}

#[test]
fn sync_checkpoint_advances_with_tip() {
    let t = tracker(NetworkType::Testnet);
    mine(&t, 0, CHECKPOINT_SPAN);
    assert_eq!(t.sync_checkpoint().unwrap().0, 0);
    mine(&t, 0, 1);
    assert_eq!(t.sync_checkpoint().unwrap().0, 1);
    mine(&t, 0, 9);
    assert_eq!(t.sync_checkpoint().unwrap().0, 10);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_readers_see_consistent_status() {
    let t = tracker(NetworkType::Testnet);
    let writer = {
        let t = t.clone();
        thread::spawn(move || mine(&t, 0, 6_000))
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let t = t.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let status = t.status();
                    assert!(status.sync_checkpoint_height <= status.tip_height);
                    assert_eq!(
                        status.sync_checkpoint_height,
                        status.tip_height.saturating_sub(CHECKPOINT_SPAN)
                    );
                    assert_eq!(status.total_blocks_estimate, 0);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    let status = t.status();
    assert_eq!(status.tip_height, 6_000);
    assert_eq!(status.sync_checkpoint_height, 1_000);
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["tip_height"], 6_000);
}
