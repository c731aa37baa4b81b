//! Error types for Seedcoin.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: expected 32 bytes, got {0}")] InvalidLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("checkpoint mismatch at height {height}: got {got}, expected {expected}")]
    CheckpointMismatch { height: u64, got: String, expected: String },
    #[error("block at height {height} is at or below sync checkpoint {sync_height}")]
    BelowSyncCheckpoint { height: u64, sync_height: u64 },
    #[error("unknown parent: {0}")] UnknownParent(String),
    #[error("duplicate block: {0}")] DuplicateBlock(String),
    #[error("height overflow above parent {0}")] HeightOverflow(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainIndexError {
    #[error("block not found: {0}")] BlockNotFound(String),
    #[error("unknown parent: {0}")] UnknownParent(String),
    #[error("duplicate block: {0}")] DuplicateBlock(String),
    #[error("height overflow above parent {0}")] HeightOverflow(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unknown network: {0}")] UnknownNetwork(String),
    #[error("checkpoint at height {height}: {source}")]
    InvalidCheckpoint { height: u64, source: HashParseError },
    #[error("duplicate checkpoint height: {0}")] DuplicateCheckpoint(u64),
    #[error("invalid genesis constant: {0}")] InvalidGenesis(HashParseError),
    #[error("genesis checkpoint {checkpoint} does not match genesis hash {genesis}")]
    GenesisCheckpointMismatch { checkpoint: String, genesis: String },
    #[error("genesis merkle root {computed} does not match compiled-in {expected}")]
    GenesisMerkleMismatch { computed: String, expected: String },
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)] Block(#[from] BlockError),
    #[error(transparent)] ChainIndex(#[from] ChainIndexError),
    #[error(transparent)] Params(#[from] ParamsError),
    #[error(transparent)] HashParse(#[from] HashParseError),
}

impl From<ChainIndexError> for BlockError {
    fn from(err: ChainIndexError) -> Self {
        match err {
            ChainIndexError::UnknownParent(h) | ChainIndexError::BlockNotFound(h) => {
                Self::UnknownParent(h)
            }
            ChainIndexError::DuplicateBlock(h) => Self::DuplicateBlock(h),
            ChainIndexError::HeightOverflow(h) => Self::HeightOverflow(h),
        }
    }
}
