use std::fmt;

use log::{info, warn};

use super::{Block, GENESIS_PROOF, Hasher, pow};
use crate::error::{LedgerError, Result};

/// First inconsistency found while walking a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainFault {
    /// `previous_hash` does not match the predecessor's hash.
    BrokenLink { index: u64 },
    /// `proof` does not solve the puzzle against the predecessor's proof.
    InvalidProof { index: u64 },
}

impl fmt::Display for ChainFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainFault::BrokenLink { index } => {
                write!(f, "block #{index} does not link to its predecessor")
            }
            ChainFault::InvalidProof { index } => {
                write!(f, "block #{index} carries an invalid proof")
            }
        }
    }
}

/// Simple in-memory ledger with Proof-of-Work.
///
/// No internal locking: callers sharing a ledger must serialize access and
/// treat last block -> proof -> hash -> append as one unit.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    hasher: Hasher,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Hasher::default(), GENESIS_PROOF)
    }
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new(hasher: Hasher, genesis_proof: i64) -> Self {
        Self {
            chain: vec![Block::genesis(genesis_proof)],
            hasher,
        }
    }

    /// Append a block built from caller-supplied values. Nothing is
    /// checked here; run `is_chain_valid` to catch bad inputs.
    pub fn create_block(&mut self, proof: i64, previous_hash: String) -> &Block {
        let index = self.chain.len() as u64 + 1;
        self.chain.push(Block::new(index, proof, previous_hash));
        info!("LEDGER - appended block #{index} (proof={proof})");
        &self.chain[self.chain.len() - 1]
    }

    /// The most recently appended block.
    pub fn get_last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn hash(&self, block: &Block) -> String {
        block.compute_hash(&self.hasher)
    }

    /// Blocking search; see `ProofSearch` for a cancellable variant.
    pub fn proof_of_work(&self, previous_proof: i64) -> i64 {
        pow::proof_of_work(&self.hasher, previous_proof)
    }

    /// Run the full mining sequence against the current tip and append.
    pub fn mine_block(&mut self) -> Result<&Block> {
        let previous = self.get_last_block()?;
        let proof = self.proof_of_work(previous.proof);
        let previous_hash = self.hash(previous);
        Ok(self.create_block(proof, previous_hash))
    }

    /// Walk `chain` from its second block and report the first block
    /// whose linkage or proof is inconsistent with its predecessor.
    pub fn verify_chain(&self, chain: &[Block]) -> std::result::Result<(), ChainFault> {
        for pair in chain.windows(2) {
            let (previous, block) = (&pair[0], &pair[1]);
            if block.previous_hash != self.hash(previous) {
                return Err(ChainFault::BrokenLink { index: block.index });
            }
            if !pow::is_valid_proof(&self.hasher, block.proof, previous.proof) {
                return Err(ChainFault::InvalidProof { index: block.index });
            }
        }
        Ok(())
    }

    pub fn is_chain_valid(&self, chain: &[Block]) -> bool {
        match self.verify_chain(chain) {
            Ok(()) => true,
            Err(fault) => {
                warn!("LEDGER - validation failed: {fault}");
                false
            }
        }
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::pow::puzzle_digest;

    fn ledger_with_mined_tip() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.mine_block().unwrap();
        ledger
    }

    #[test]
    fn new_ledger_holds_only_genesis() {
        let ledger = Ledger::default();
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.get_last_block().unwrap();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, 1);
        assert_eq!(genesis.previous_hash, "0");
        assert!(ledger.is_chain_valid(ledger.chain()));
    }

    #[test]
    fn create_block_appends_with_next_index() {
        let mut ledger = Ledger::default();
        let b = ledger.create_block(77, "whatever".into()).clone();
        assert_eq!(b.index, 2);
        assert_eq!(b.proof, 77);
        assert_eq!(b.previous_hash, "whatever");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get_last_block().unwrap(), &b);
        assert_eq!(ledger.create_block(1, "x".into()).index, 3);
    }

    #[test]
    fn create_block_does_not_validate_inputs() {
        let mut ledger = Ledger::default();
        ledger.create_block(2, "not-a-hash".into());
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_chain_valid(ledger.chain()));
    }

    #[test]
    fn empty_chain_has_no_last_block() {
        let ledger = Ledger {
            chain: Vec::new(),
            hasher: Hasher::default(),
        };
        assert_eq!(ledger.get_last_block(), Err(LedgerError::EmptyChain));
        assert!(ledger.is_chain_valid(ledger.chain()));
    }

    #[test]
    fn hash_matches_block_digest() {
        let ledger = Ledger::default();
        let genesis = ledger.get_last_block().unwrap();
        assert_eq!(ledger.hash(genesis), genesis.compute_hash(ledger.hasher()));
        assert_eq!(ledger.hash(genesis), ledger.hash(&genesis.clone()));
    }

    #[test]
    fn end_to_end_mine_from_genesis() {
        let mut ledger = Ledger::default();
        let previous = ledger.get_last_block().unwrap().clone();
        let proof = ledger.proof_of_work(previous.proof);
        let previous_hash = ledger.hash(&previous);
        ledger.create_block(proof, previous_hash.clone());

        assert_eq!(ledger.len(), 2);
        let tip = ledger.get_last_block().unwrap();
        assert_eq!(tip.index, 2);
        assert_eq!(tip.proof, 632238);
        assert_eq!(tip.previous_hash, previous_hash);
        assert!(puzzle_digest(ledger.hasher(), tip.proof, previous.proof).starts_with("00000"));
        assert!(ledger.is_chain_valid(ledger.chain()));
    }

    #[test]
    fn mutated_previous_hash_breaks_the_chain() {
        let ledger = ledger_with_mined_tip();
        let mut chain = ledger.chain().to_vec();
        chain[1].previous_hash = "deadbeef".into();
        assert_eq!(
            ledger.verify_chain(&chain),
            Err(ChainFault::BrokenLink { index: 2 })
        );
        assert!(!ledger.is_chain_valid(&chain));
    }

    #[test]
    fn mutated_proof_breaks_the_chain() {
        let ledger = ledger_with_mined_tip();
        let mut chain = ledger.chain().to_vec();
        chain[1].proof = 632237;
        assert_eq!(
            ledger.verify_chain(&chain),
            Err(ChainFault::InvalidProof { index: 2 })
        );
        assert!(!ledger.is_chain_valid(&chain));
    }

    #[test]
    fn tampering_with_a_predecessor_breaks_its_successor() {
        let ledger = ledger_with_mined_tip();
        let mut chain = ledger.chain().to_vec();
        chain[0].timestamp = "rewritten".into();
        assert_eq!(
            ledger.verify_chain(&chain),
            Err(ChainFault::BrokenLink { index: 2 })
        );
    }

    #[test]
    fn genesis_is_exempt_from_checks() {
        let ledger = Ledger::new(Hasher::default(), 123_456);
        let mut chain = ledger.chain().to_vec();
        chain[0].previous_hash = "anything".into();
        assert!(ledger.is_chain_valid(&chain));
    }

    #[test]
    fn validation_stops_at_first_fault() {
        let mut ledger = ledger_with_mined_tip();
        let tip_hash = ledger.hash(ledger.get_last_block().unwrap());
        ledger.create_block(5, tip_hash);
        ledger.create_block(6, "bad".into());
        assert_eq!(
            ledger.verify_chain(ledger.chain()),
            Err(ChainFault::InvalidProof { index: 3 })
        );
    }

    #[test]
    fn tampering_mid_chain_is_caught() {
        let mut ledger = Ledger::default();
        for _ in 0..3 {
            ledger.mine_block().unwrap();
        }
        assert_eq!(ledger.len(), 4);
        assert!(ledger.is_chain_valid(ledger.chain()));

        let mut relinked = ledger.chain().to_vec();
        relinked[2].previous_hash = "deadbeef".into();
        assert_eq!(
            ledger.verify_chain(&relinked),
            Err(ChainFault::BrokenLink { index: 3 })
        );

        // 403091 is the first solution after 632238, so anything below fails
        let mut reproved = ledger.chain().to_vec();
        assert_eq!(reproved[2].proof, 403091);
        reproved[2].proof = 403090;
        assert_eq!(
            ledger.verify_chain(&reproved),
            Err(ChainFault::InvalidProof { index: 3 })
        );
        assert!(!ledger.is_chain_valid(&reproved));
    }

    #[test]
    fn negative_genesis_seed_mines_and_validates() {
        let mut ledger = Ledger::new(Hasher::default(), -5);
        let proof = ledger.mine_block().unwrap().proof;
        assert!(proof >= 1);
        assert!(ledger.is_chain_valid(ledger.chain()));
    }
}
