pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;

pub use block::Block;
pub use hasher::BlockHash;
pub use model::Blockchain;
pub use pow::{MiningTemplate, ProofOfWork};

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 3;

/// Reserved sender of reward transactions.
pub const MINING_SENDER: &str = "THE BLOCKCHAIN";

/// Reward paid to the miner for each sealed block.
pub const MINING_REWARD: f64 = 1.0;

/// Mining parameters fixed at chain construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub difficulty: u32,
    pub mining_sender: String,
    pub mining_reward: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            mining_sender: MINING_SENDER.to_string(),
            mining_reward: MINING_REWARD,
        }
    }
}
