use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, MempoolResponse, NewTxRequest, NewTxResponse};

/// Queue a transfer for the next mined block. Amounts and addresses are
/// taken as-is.
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    bc.add_transaction(&body.sender, &body.recipient, body.amount);
    let pending = bc.pending().len();
    debug!(
        "POST /transactions/ - {} -> {} ({}) queued, pool size {}",
        body.sender, body.recipient, body.amount, pending
    );

    HttpResponse::Ok().json(NewTxResponse { pending })
}

/// List the pending pool.
#[get("/mempool/")]
pub async fn get_mempool(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(MempoolResponse {
        size: bc.pending().len(),
        transactions: bc.pending(),
    })
}
