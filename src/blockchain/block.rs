use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{GENESIS_PREVIOUS_HASH, Hasher};

/// A single block in the ledger. Immutable once appended.
///
/// Field order is the canonical encoding order (version 1): hashing
/// serializes exactly these four fields, in this order, as compact JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String, // cosmetic, never checked
    pub proof: i64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (index 1, sentinel previous hash).
    pub fn genesis(proof: i64) -> Self {
        Self::new(1, proof, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Create a block stamped with the current UTC time.
    pub fn new(index: u64, proof: i64, previous_hash: String) -> Self {
        Self::new_with_timestamp(index, proof, previous_hash, current_timestamp())
    }

    pub fn new_with_timestamp(
        index: u64,
        proof: i64,
        previous_hash: String,
        timestamp: String,
    ) -> Self {
        Self {
            index,
            timestamp,
            proof,
            previous_hash,
        }
    }

    /// Canonical byte encoding used for every block hash.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("block fields always serialize")
    }

    /// Digest of the canonical encoding.
    pub fn compute_hash(&self, hasher: &Hasher) -> String {
        hasher.digest(&self.canonical_bytes())
    }
}

fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.6f UTC").to_string()
}
