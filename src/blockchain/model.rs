use log::{debug, info};
use std::fmt;
use std::time::Duration;

use super::block::now_nanos;
use super::{Block, BlockHash, ChainConfig, MiningTemplate, ProofOfWork};
use crate::error::ChainError;
use crate::transaction::Transaction;

/// Simple in-memory blockchain with Proof-of-Work.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    miner_address: String,
    config: ChainConfig,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    ///
    /// The genesis block links to the digest of `Block::default()` and is
    /// committed before the chain is handed out, so it is never empty.
    pub fn new(miner_address: impl Into<String>, config: ChainConfig) -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            miner_address: miner_address.into(),
            config,
        };
        bc.create_block(0, Block::default().hash());
        bc
    }

    /// Queue a transfer for the next block. No balance or signature checks.
    pub fn add_transaction(&mut self, sender: &str, recipient: &str, amount: f64) {
        self.pending.push(Transaction::new(sender, recipient, amount));
    }

    /// Independent copy of the pending pool.
    pub fn copy_pending(&self) -> Vec<Transaction> {
        self.pending.clone()
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Seal the pending pool into a block stamped with the current time,
    /// append it and clear the pool.
    pub fn create_block(&mut self, nonce: u64, previous_hash: BlockHash) -> &Block {
        self.commit(now_nanos(), nonce, previous_hash)
    }

    fn commit(&mut self, timestamp: i64, nonce: u64, previous_hash: BlockHash) -> &Block {
        let transactions = std::mem::take(&mut self.pending);
        self.chain.push(Block::with_timestamp(
            timestamp,
            nonce,
            previous_hash,
            transactions,
        ));
        self.last_block()
    }

    /// Freeze the current timestamp, tip digest and a copy of the pool.
    fn mining_template(&self) -> MiningTemplate {
        MiningTemplate::new(now_nanos(), self.last_block().hash(), self.copy_pending())
    }

    fn push_reward(&mut self) {
        let sender = self.config.mining_sender.clone();
        let recipient = self.miner_address.clone();
        self.add_transaction(&sender, &recipient, self.config.mining_reward);
    }

    /// Pay the miner, search for a nonce and commit the block.
    ///
    /// The committed block keeps the timestamp the nonce was searched
    /// against, so its own digest meets the difficulty.
    pub fn mine(&mut self) -> bool {
        self.push_reward();
        let template = self.mining_template();
        let nonce = self.proof_of_work().search(&template);
        self.seal(template, nonce);
        true
    }

    /// Bounded variant of [`Blockchain::mine`]. On timeout the reward is
    /// withdrawn and neither the chain nor the pool changes.
    pub fn mine_with_deadline(&mut self, deadline: Duration) -> Result<&Block, ChainError> {
        self.push_reward();
        let template = self.mining_template();
        match self.proof_of_work().search_with_deadline(&template, deadline) {
            Ok(nonce) => Ok(self.seal(template, nonce)),
            Err(e) => {
                self.pending.pop();
                debug!("MINER - gave up: {}", e);
                Err(e)
            }
        }
    }

    fn seal(&mut self, template: MiningTemplate, nonce: u64) -> &Block {
        let previous_hash = self.last_block().hash();
        let index = self.chain.len();
        let block = self.commit(template.timestamp, nonce, previous_hash);
        info!(
            "MINER - sealed block #{} (hash={}, nonce={}, txs={})",
            index,
            block.hash(),
            block.nonce,
            block.transactions.len()
        );
        block
    }

    fn proof_of_work(&self) -> ProofOfWork {
        ProofOfWork::new(self.config.difficulty)
    }

    /// Net amount received minus sent by `address` across committed blocks.
    pub fn calculate_balance(&self, address: &str) -> f64 {
        let mut total = 0.0;
        for tx in self.chain.iter().flat_map(|b| &b.transactions) {
            if tx.recipient == address {
                total += tx.amount;
            }
            if tx.sender == address {
                total -= tx.amount;
            }
        }
        total
    }

    /// Validate linkage and PoW of every block after genesis.
    pub fn is_valid_chain(&self) -> bool {
        let genesis = &self.chain[0];
        if genesis.nonce != 0 || genesis.previous_hash != Block::default().hash() {
            return false;
        }

        let pow = self.proof_of_work();
        self.chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            current.previous_hash == prev.hash() && current.is_valid(pow.difficulty())
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn miner_address(&self) -> &str {
        &self.miner_address
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.chain.iter().enumerate() {
            let bar = "=".repeat(25);
            writeln!(f, "{bar} Chain {i} {bar}")?;
            writeln!(f, "{block}")?;
        }
        write!(f, "{}", "*".repeat(25))
    }
}
