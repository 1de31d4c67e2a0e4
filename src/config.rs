use std::env;

use crate::blockchain::GENESIS_PROOF;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HASH_ALGORITHM: &str = "sha256";

/// Runtime settings read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub hash_algorithm: String,
    pub genesis_proof: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            hash_algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
            genesis_proof: GENESIS_PROOF,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparsable numbers
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            hash_algorithm: lookup("HASH_ALGORITHM").unwrap_or(defaults.hash_algorithm),
            genesis_proof: lookup("GENESIS_PROOF")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.genesis_proof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
        assert_eq!(Config::default().port, 5000);
        assert_eq!(Config::default().genesis_proof, 1);
    }

    #[test]
    fn reads_every_key() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("HASH_ALGORITHM", "sha-256"),
            ("GENESIS_PROOF", "42"),
        ]));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.hash_algorithm, "sha-256");
        assert_eq!(cfg.genesis_proof, 42);
    }

    #[test]
    fn numbers_tolerate_surrounding_whitespace() {
        let cfg = Config::from_lookup(lookup_from(&[("PORT", " 8080 "), ("GENESIS_PROOF", " -5 ")]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.genesis_proof, -5);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let cfg = Config::from_lookup(lookup_from(&[("PORT", "http"), ("GENESIS_PROOF", "one")]));
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.genesis_proof, 1);
    }
}
