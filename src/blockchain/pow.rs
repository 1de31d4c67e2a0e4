use std::time::Instant;

use log::debug;

use super::miner::CancelToken;
use super::{Hasher, PUZZLE_ZEROS};

/// How many candidates are tried between cancellation checks.
const CANCEL_CHECK_INTERVAL: i64 = 4096;

/// The value hashed for candidate `proof` against `previous_proof`:
/// the decimal rendering of `proof^2 - previous_proof^2`, sign included.
///
/// Widened to i128 so no pair of i64 proofs can overflow.
pub fn puzzle_input(proof: i64, previous_proof: i64) -> String {
    let (n, p) = (i128::from(proof), i128::from(previous_proof));
    (n * n - p * p).to_string()
}

pub fn puzzle_digest(hasher: &Hasher, proof: i64, previous_proof: i64) -> String {
    hasher.digest(puzzle_input(proof, previous_proof).as_bytes())
}

fn meets_target(digest: &str, zeros: usize) -> bool {
    digest.len() >= zeros && digest.bytes().take(zeros).all(|c| c == b'0')
}

/// Whether `proof` solves the puzzle relative to `previous_proof`
/// at the ledger's fixed target.
pub fn is_valid_proof(hasher: &Hasher, proof: i64, previous_proof: i64) -> bool {
    meets_target(&puzzle_digest(hasher, proof, previous_proof), PUZZLE_ZEROS)
}

/// Brute-force search for the first candidate `n >= 1` whose puzzle digest
/// starts with `zeros` hex zeros. Returns `None` only if `cancel` fires.
pub fn search_proof(
    hasher: &Hasher,
    previous_proof: i64,
    zeros: usize,
    cancel: &CancelToken,
) -> Option<i64> {
    let started = Instant::now();
    let mut candidate: i64 = 1;
    loop {
        if candidate % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            debug!(
                "POW - search from previous_proof={} cancelled after {} candidates",
                previous_proof, candidate
            );
            return None;
        }
        if meets_target(&puzzle_digest(hasher, candidate, previous_proof), zeros) {
            debug!(
                "POW - previous_proof={} solved by {} ({} ms)",
                previous_proof,
                candidate,
                started.elapsed().as_millis()
            );
            return Some(candidate);
        }
        candidate += 1;
    }
}

/// Uninterruptible search at the ledger's fixed target.
pub fn proof_of_work(hasher: &Hasher, previous_proof: i64) -> i64 {
    match search_proof(hasher, previous_proof, PUZZLE_ZEROS, &CancelToken::new()) {
        Some(proof) => proof,
        // a fresh token is never cancelled
        None => proof_of_work(hasher, previous_proof),
    }
}
