//! Identify configuration.
//!
//! Read from an optional YAML file, then overridden from the environment:
//!
//! - `IDTAB_MAX_CONCURRENT_CHECKS` (default: 8)
//! - `IDTAB_CACHE_TTL_SECS` (default: 3600)
//! - `IDTAB_CACHE_ENABLED` (default: true)
//! - `IDTAB_BITCOIN_NETWORK` (default: mainnet)

use std::path::Path;
use std::str::FromStr;

use idtab_core::BitcoinNetwork;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for table construction and proof verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentifyConfig {
    /// Upper bound on proofs verified at the same time.
    pub max_concurrent_checks: usize,
    /// Age after which a cached verification result is ignored.
    pub cache_ttl_secs: u64,
    pub cache_enabled: bool,
    /// Network whose address versions the classifier accepts.
    pub bitcoin_network: BitcoinNetwork,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_checks: 8,
            cache_ttl_secs: 3600,
            cache_enabled: true,
            bitcoin_network: BitcoinNetwork::Mainnet,
        }
    }
}

impl IdentifyConfig {
    /// Load from `path` when given, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p).map_err(|source| ConfigError::Io {
                    path: p.display().to_string(),
                    source,
                })?;
                Self::from_yaml_str(&raw)?
            }
            None => Self::default(),
        };
        cfg.apply_env(|var| std::env::var(var).ok())?;
        cfg.validate()?;
        tracing::debug!(?cfg, "loaded identify config");
        Ok(cfg)
    }

    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = env_parse(&lookup, "IDTAB_MAX_CONCURRENT_CHECKS")? {
            self.max_concurrent_checks = v;
        }
        if let Some(v) = env_parse(&lookup, "IDTAB_CACHE_TTL_SECS")? {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = env_parse(&lookup, "IDTAB_CACHE_ENABLED")? {
            self.cache_enabled = v;
        }
        if let Some(v) = env_parse(&lookup, "IDTAB_BITCOIN_NETWORK")? {
            self.bitcoin_network = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_checks == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = IdentifyConfig::default();
        assert_eq!(cfg.max_concurrent_checks, 8);
        assert_eq!(cfg.cache_ttl_secs, 3600);
        assert!(cfg.cache_enabled);
        assert_eq!(cfg.bitcoin_network, BitcoinNetwork::Mainnet);
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let cfg =
            IdentifyConfig::from_yaml_str("cache_ttl_secs: 60\nbitcoin_network: testnet\n")
                .unwrap();
        assert_eq!(cfg.cache_ttl_secs, 60);
        assert_eq!(cfg.bitcoin_network, BitcoinNetwork::Testnet);
        assert_eq!(cfg.max_concurrent_checks, 8);
    }

    #[test]
    fn yaml_rejects_unknown_fields() {
        assert!(matches!(
            IdentifyConfig::from_yaml_str("max_checks: 3\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn yaml_rejects_zero_concurrency() {
        assert!(matches!(
            IdentifyConfig::from_yaml_str("max_concurrent_checks: 0\n"),
            Err(ConfigError::ZeroConcurrency)
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = IdentifyConfig::default();
        cfg.apply_env(env(&[
            ("IDTAB_MAX_CONCURRENT_CHECKS", "2"),
            ("IDTAB_CACHE_ENABLED", "false"),
            ("IDTAB_BITCOIN_NETWORK", "testnet"),
        ]))
        .unwrap();
        assert_eq!(cfg.max_concurrent_checks, 2);
        assert!(!cfg.cache_enabled);
        assert_eq!(cfg.bitcoin_network, BitcoinNetwork::Testnet);
        assert_eq!(cfg.cache_ttl_secs, 3600);
    }

    #[test]
    fn env_rejects_garbage() {
        let mut cfg = IdentifyConfig::default();
        let err = cfg
            .apply_env(env(&[("IDTAB_CACHE_TTL_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"soon\" for IDTAB_CACHE_TTL_SECS");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idtab.yaml");
        std::fs::write(&path, "max_concurrent_checks: 3\n").unwrap();
        let cfg = IdentifyConfig::load(Some(&path)).unwrap();
        assert!(cfg.max_concurrent_checks >= 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = IdentifyConfig::load(Some(Path::new("/nonexistent/idtab.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
