use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use log::{debug, warn};
use tokio::sync::oneshot;

use super::pow::search_proof;
use super::{Hasher, PUZZLE_ZEROS};

/// Shared cancellation flag for a running proof search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A proof search running on its own OS thread.
///
/// The single result arrives over a oneshot channel. Dropping the handle
/// before the result is read cancels the worker.
pub struct ProofSearch {
    previous_proof: i64,
    cancel: CancelToken,
    rx: oneshot::Receiver<Option<i64>>,
}

impl ProofSearch {
    pub fn spawn(hasher: Hasher, previous_proof: i64) -> Self {
        Self::spawn_with_target(hasher, previous_proof, PUZZLE_ZEROS)
    }

    pub(crate) fn spawn_with_target(hasher: Hasher, previous_proof: i64, zeros: usize) -> Self {
        let cancel = CancelToken::new();
        let (tx, rx) = oneshot::channel();
        let worker_cancel = cancel.clone();
        thread::spawn(move || {
            let outcome = search_proof(&hasher, previous_proof, zeros, &worker_cancel);
            // receiver gone means nobody is waiting any more
            let _ = tx.send(outcome);
        });
        debug!("MINER - proof search spawned (previous_proof={previous_proof})");
        Self {
            previous_proof,
            cancel,
            rx,
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait for the worker. `None` if the search was cancelled.
    pub async fn wait(mut self) -> Option<i64> {
        match (&mut self.rx).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    "MINER - worker for previous_proof={} exited without a result",
                    self.previous_proof
                );
                None
            }
        }
    }
}

impl Drop for ProofSearch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
