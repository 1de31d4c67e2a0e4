use sha2::{Digest, Sha256};

use crate::error::{LedgerError, Result};

/// Digest primitives this build knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
}

impl HashAlgorithm {
    /// Resolve an algorithm by its configured name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(LedgerError::HashAlgorithmUnavailable(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

/// Stateless byte-to-hex digest function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Default for Hasher {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
        }
    }
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Build a hasher from a configured algorithm name. Fails with
    /// `HashAlgorithmUnavailable` for anything the build does not ship.
    pub fn from_name(name: &str) -> Result<Self> {
        HashAlgorithm::from_name(name).map(Self::new)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lowercase hex digest of `bytes` (64 chars for a 256-bit primitive).
    pub fn digest(&self, bytes: &[u8]) -> String {
        match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(bytes);
                hex::encode(hasher.finalize())
            }
        }
    }
}
