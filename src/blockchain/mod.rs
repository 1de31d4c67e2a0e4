pub mod block;
pub mod hasher;
pub mod miner;
pub mod model;
pub mod pow;

pub use block::Block;
pub use hasher::{HashAlgorithm, Hasher};
pub use miner::{CancelToken, ProofSearch};
pub use model::{ChainFault, Ledger};

/// Seed proof of the genesis block.
pub const GENESIS_PROOF: i64 = 1;

/// `previous_hash` sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Leading hex zeros a puzzle digest must carry.
pub const PUZZLE_ZEROS: usize = 5;

/// Version of the block encoding fed to the hasher. Bump it (and treat
/// existing chains as a different format) if `Block`'s field set or order
/// ever changes.
pub const CANONICAL_ENCODING_VERSION: u32 = 1;
