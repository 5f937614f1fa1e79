use crate::blockchain::{Block, Blockchain, ChainConfig};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Shared application state with one in-memory blockchain.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
    pub mining_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(
        miner_address: impl Into<String>,
        config: ChainConfig,
        mining_timeout: Option<Duration>,
    ) -> Self {
        Self {
            blockchain: Mutex::new(Blockchain::new(miner_address, config)),
            mining_timeout,
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub miner_address: &'a str,
    pub length: usize,
    pub difficulty: u32,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub mined_index: usize,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: u32,
    pub reward: f64,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub pending: usize,
}

#[derive(Serialize)]
pub struct MempoolResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: f64,
}
