use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("mining timed out after {elapsed:?} ({nonces_tried} nonces tried)")]
    MiningTimeout { elapsed: Duration, nonces_tried: u64 },
}
