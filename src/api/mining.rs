use actix_web::{HttpResponse, Responder, route, web};
use log::{info, warn};
use std::time::Instant;

use super::models::{AppState, MineResponse};
use crate::blockchain::ProofSearch;

/// Mine one block on top of the current tip:
/// - snapshot the tip under the ledger lock
/// - search for its successor proof on a worker thread
/// - hash the tip and append under the ledger lock
///
/// Rounds are serialized by the mining lock. If the client goes away the
/// handler future is dropped, which cancels the worker.
#[route("/mine_block/", method = "GET", method = "POST")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let _round = state.mining.lock().await;
    let t0 = Instant::now();

    let (previous, hasher) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        match ledger.get_last_block() {
            Ok(block) => (block.clone(), *ledger.hasher()),
            Err(e) => {
                warn!("MINER - cannot mine: {e}");
                return HttpResponse::InternalServerError().body(e.to_string());
            }
        }
    };

    let Some(proof) = ProofSearch::spawn(hasher, previous.proof).wait().await else {
        warn!("MINER - proof search on block #{} abandoned", previous.index);
        return HttpResponse::ServiceUnavailable().body("proof search cancelled");
    };

    let block = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let previous_hash = ledger.hash(&previous);
        ledger.create_block(proof, previous_hash).clone()
    };

    info!(
        "MINER - sealed block #{} (proof={}, {} ms)",
        block.index,
        block.proof,
        t0.elapsed().as_millis()
    );
    HttpResponse::Ok().json(MineResponse::from(block))
}
