use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The requested digest primitive is not compiled into this build.
    #[error("hash algorithm unavailable: {0}")]
    HashAlgorithmUnavailable(String),

    /// The chain has no blocks. Unreachable through `Ledger::new`.
    #[error("chain is empty")]
    EmptyChain,
}
