//! # Verification Errors
//!
//! Per-proof failures are [`ProofError`](idtab_core::ProofError) values
//! recorded on the links themselves. The only error `identify` returns is
//! the aggregate [`IdentifyError`].

use thiserror::Error;

/// Aggregate outcome of an identify run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    /// At least one active proof did not verify. Every other proof was
    /// still checked.
    #[error("one or more proofs failed")]
    ProofsFailed {
        /// How many active proofs failed.
        failed: usize,
    },
}

/// Errors loading an [`IdentifyConfig`](crate::config::IdentifyConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// `max_concurrent_checks` must be at least 1.
    #[error("max_concurrent_checks must be at least 1")]
    ZeroConcurrency,
}
