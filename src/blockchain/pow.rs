use log::debug;
use std::time::{Duration, Instant};

use super::hasher::{self, BlockHash};
use crate::error::ChainError;
use crate::transaction::Transaction;

/// How many nonces to try between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Frozen input of one nonce search: the timestamp, the tip digest and a
/// snapshot of the pending pool. Nothing here changes while the search runs.
#[derive(Debug, Clone)]
pub struct MiningTemplate {
    pub timestamp: i64,
    pub previous_hash: BlockHash,
    pub transactions: Vec<Transaction>,
}

impl MiningTemplate {
    pub fn new(timestamp: i64, previous_hash: BlockHash, transactions: Vec<Transaction>) -> Self {
        Self {
            timestamp,
            previous_hash,
            transactions,
        }
    }
}

/// Linear nonce search against a leading-zero hex target.
#[derive(Debug, Clone, Copy)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Hash the candidate block `(template.timestamp, nonce, previous_hash, transactions)`
    /// and check its hex digest starts with `difficulty` zeros.
    pub fn valid_proof(&self, nonce: u64, template: &MiningTemplate) -> bool {
        let guess = hasher::hash_parts(
            template.timestamp,
            nonce,
            &template.previous_hash,
            &template.transactions,
        );
        hasher::meets_difficulty(&guess, self.difficulty)
    }

    /// Smallest valid nonce, counting up from zero. Never gives up: a
    /// difficulty that cannot be met spins forever.
    pub fn search(&self, template: &MiningTemplate) -> u64 {
        let mut nonce: u64 = 0;
        while !self.valid_proof(nonce, template) {
            nonce = nonce.wrapping_add(1);
        }
        debug!(
            "POW - nonce {} found (difficulty={}, txs={})",
            nonce,
            self.difficulty,
            template.transactions.len()
        );
        nonce
    }

    /// Same search as [`ProofOfWork::search`], abandoned once `deadline` has elapsed.
    pub fn search_with_deadline(
        &self,
        template: &MiningTemplate,
        deadline: Duration,
    ) -> Result<u64, ChainError> {
        let started = Instant::now();
        let mut nonce: u64 = 0;
        loop {
            if self.valid_proof(nonce, template) {
                debug!(
                    "POW - nonce {} found in {:?} (difficulty={})",
                    nonce,
                    started.elapsed(),
                    self.difficulty
                );
                return Ok(nonce);
            }
            if nonce % DEADLINE_CHECK_INTERVAL == 0 {
                let elapsed = started.elapsed();
                if elapsed >= deadline {
                    return Err(ChainError::MiningTimeout {
                        elapsed,
                        nonces_tried: nonce + 1,
                    });
                }
            }
            nonce = nonce.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Block;

    fn template() -> MiningTemplate {
        MiningTemplate::new(
            0,
            BlockHash::default(),
            vec![Transaction::new("alice", "bob", 1.0)],
        )
    }

    #[test]
    fn search_returns_smallest_valid_nonce() {
        let pow = ProofOfWork::new(2);
        let t = template();
        let nonce = pow.search(&t);
        assert!(pow.valid_proof(nonce, &t));
        assert!((0..nonce).all(|n| !pow.valid_proof(n, &t)));
    }

    #[test]
    fn search_is_reproducible() {
        let pow = ProofOfWork::new(2);
        assert_eq!(pow.search(&template()), pow.search(&template()));
    }

    #[test]
    fn zero_difficulty_accepts_first_nonce() {
        assert_eq!(ProofOfWork::new(0).search(&template()), 0);
    }

    #[test]
    fn sealed_block_meets_difficulty() {
        let pow = ProofOfWork::new(3);
        let t = template();
        let nonce = pow.search(&t);
        let block = Block::with_timestamp(t.timestamp, nonce, t.previous_hash, t.transactions);
        assert_eq!(block.nonce, nonce);
        assert!(block.hash().to_hex().starts_with("000"));
    }

    #[test]
    fn deadline_search_matches_unbounded_search() {
        let pow = ProofOfWork::new(2);
        let t = template();
        let bounded = pow
            .search_with_deadline(&t, Duration::from_secs(60))
            .unwrap();
        assert_eq!(bounded, pow.search(&t));
    }

    #[test]
    fn expired_deadline_times_out() {
        let pow = ProofOfWork::new(64);
        let err = pow
            .search_with_deadline(&template(), Duration::ZERO)
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::MiningTimeout { nonces_tried: 1, .. }
        ));
    }
}
