mod balance;
mod chain;
mod health;
pub mod models;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(tx::post_transaction)
            .service(tx::get_mempool)
            .service(balance::get_balance),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ChainConfig;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn state(difficulty: u32, timeout: Option<Duration>) -> web::Data<AppState> {
        let config = ChainConfig {
            difficulty,
            ..ChainConfig::default()
        };
        web::Data::new(AppState::new("M", config, timeout))
    }

    #[actix_web::test]
    async fn health_is_up() {
        let app = test::init_service(
            App::new()
                .app_data(state(1, None))
                .configure(init_routes),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn transfer_mine_and_balances() {
        let app = test::init_service(
            App::new()
                .app_data(state(2, None))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/")
            .set_json(json!({ "sender": "A", "recipient": "B", "amount": 1.0 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pending"], 1);

        let req = test::TestRequest::get().uri("/api/v1/mempool/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 1);
        assert_eq!(body["transactions"][0]["sender_blockchain_address"], "A");

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["mined_index"], 1);
        assert!(body["hash"].as_str().unwrap().starts_with("00"));

        for (address, expected) in [("A", -1.0), ("B", 1.0), ("M", 1.0)] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1/balance/{address}/"))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["balance"].as_f64(), Some(expected), "balance of {address}");
        }

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 2);
        assert_eq!(body["miner_address"], "M");
        assert_eq!(body["chain"][1]["transactions"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
    }

    #[actix_web::test]
    async fn mining_timeout_is_unavailable() {
        let data = state(64, Some(Duration::ZERO));
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bc = data.blockchain.lock().unwrap();
        assert_eq!(bc.len(), 1);
        assert!(bc.pending().is_empty());
    }
}
