//! Integration test suite for Seedcoin checkpoint enforcement.
//!
//! The tests in `tests/` drive the registry, the acceptor, and the shared
//! chain tracker the way chain-selection code does, including adversarial
//! fork attempts.

pub mod helpers;
