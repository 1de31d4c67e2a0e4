use crate::blockchain::{Block, Ledger};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared application state: the in-memory ledger plus the lock that
/// serializes mining rounds.
///
/// `ledger` is held only for short reads and appends. `mining` is held
/// for a whole round (tip snapshot, proof search, append) so that at most
/// one block is in flight while readers keep seeing the current chain.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub mining: tokio::sync::Mutex<()>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            mining: tokio::sync::Mutex::new(()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Ledger::default())
    }
}

pub const MINED_MESSAGE: &str = "A block is MINED";
pub const VALID_MESSAGE: &str = "The Blockchain is valid.";
pub const INVALID_MESSAGE: &str = "The Blockchain is not valid.";

/* ---------- Mining API Models ---------- */

#[derive(Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub timestamp: String,
    pub proof: i64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: MINED_MESSAGE.to_string(),
            index: block.index,
            timestamp: block.timestamp,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
