use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        miner_address: bc.miner_address(),
        length: bc.len(),
        difficulty: bc.config().difficulty,
        chain: bc.blocks(),
    };
    HttpResponse::Ok().json(resp)
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ValidateResponse {
        valid: bc.is_valid_chain(),
        length: bc.len(),
        difficulty: bc.config().difficulty,
    };
    HttpResponse::Ok().json(resp)
}

/// Mine a new block from the pending pool:
/// - Pay the reward to the chain's miner address
/// - Search for a nonce (bounded by `MINING_TIMEOUT_SECS` when set)
/// - Commit the block and clear the pool
///
/// The chain stays locked for the whole search, so rounds never overlap.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let mut bc = state.blockchain.lock().expect("mutex poisoned");

    let (hash, nonce) = match state.mining_timeout {
        Some(deadline) => match bc.mine_with_deadline(deadline) {
            Ok(block) => (block.hash(), block.nonce),
            Err(e) => {
                warn!("POST /mine/ - {}", e);
                return HttpResponse::ServiceUnavailable().body(e.to_string());
            }
        },
        None => {
            bc.mine();
            let block = bc.last_block();
            (block.hash(), block.nonce)
        }
    };

    let resp = MineResponse {
        mined_index: bc.len() - 1,
        hash: hash.to_hex(),
        nonce,
        difficulty: bc.config().difficulty,
        reward: bc.config().mining_reward,
    };
    info!(
        "POST /mine/ - block #{} (hash={}, nonce={})",
        resp.mined_index, resp.hash, resp.nonce
    );
    HttpResponse::Ok().json(resp)
}
