use chrono::Utc;
use serde::Serialize;
use std::fmt;

use super::hasher::{self, BlockHash};
use crate::transaction::Transaction;

/// A single block in the chain holding an ordered list of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub timestamp: i64, // Unix nanoseconds (UTC)
    pub nonce: u64,     // Proof-of-Work nonce
    pub previous_hash: BlockHash,
    pub transactions: Vec<Transaction>,
}

/// Current wall-clock time in Unix nanoseconds.
pub fn now_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
}

impl Block {
    pub fn with_timestamp(
        timestamp: i64,
        nonce: u64,
        previous_hash: BlockHash,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            timestamp,
            nonce,
            previous_hash,
            transactions,
        }
    }

    /// SHA-256 of the canonical serialization, recomputed on each call.
    pub fn hash(&self) -> BlockHash {
        hasher::hash_block(self)
    }

    /// Check that this block's own digest satisfies the PoW difficulty.
    /// (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        hasher::meets_difficulty(&self.hash(), difficulty)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "timestamp: {}", self.timestamp)?;
        writeln!(f, "nonce: {}", self.nonce)?;
        write!(f, "previous_hash: {}", self.previous_hash)?;
        for tx in &self.transactions {
            write!(f, "\n{tx}")?;
        }
        Ok(())
    }
}
