use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};

use proof_ledger::api::{self, AppState};
use proof_ledger::blockchain::{CANONICAL_ENCODING_VERSION, Hasher, Ledger};
use proof_ledger::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();

    let hasher = match Hasher::from_name(&cfg.hash_algorithm) {
        Ok(h) => h,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!(
        "⛓️ Starting ledger at http://{}:{} (hash={}, encoding=v{}, genesis_proof={})",
        cfg.host,
        cfg.port,
        hasher.algorithm().name(),
        CANONICAL_ENCODING_VERSION,
        cfg.genesis_proof
    );

    let state = web::Data::new(AppState::new(Ledger::new(hasher, cfg.genesis_proof)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
