use actix_web::{HttpResponse, Responder, get, web};
use log::debug;

use super::models::{AppState, ChainResponse, INVALID_MESSAGE, MessageResponse, VALID_MESSAGE};

/// Get the full chain and its length.
#[get("/get_chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Validate the whole chain. Always 200; the verdict is in the message.
#[get("/valid/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let valid = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.is_chain_valid(ledger.chain())
    };
    debug!("VALID - chain valid={valid}");
    let message = if valid { VALID_MESSAGE } else { INVALID_MESSAGE };
    HttpResponse::Ok().json(MessageResponse {
        message: message.to_string(),
    })
}
