mod api;
mod blockchain;
mod config;
mod error;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use config::Settings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let (host, port) = (settings.host.clone(), settings.port);

    info!(
        "miner={} difficulty={} reward={} timeout={:?}",
        settings.miner_address,
        settings.chain.difficulty,
        settings.chain.mining_reward,
        settings.mining_timeout
    );
    println!("⛓️ Starting blockchain API at http://{host}:{port}");

    let state = web::Data::new(AppState::new(
        settings.miner_address,
        settings.chain,
        settings.mining_timeout,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
