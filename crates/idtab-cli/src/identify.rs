//! # Identify Subcommand
//!
//! Builds the table and verifies its active proofs offline with the
//! hint-only checker. Display lines go to stdout.
//!
//! Exit code: 0 when every proof verified, 2 when one or more failed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use idtab_verify::{
    HintOnlyCheckerFactory, IdentifyConfig, IdentifyError, Identifier, MemoryProofCache,
    SigHints, StdoutSink,
};

/// Arguments for the `idtab identify` subcommand.
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// JSON file holding the chain's links in order.
    #[arg(long, value_name = "FILE")]
    pub chain: PathBuf,

    /// JSON file holding the server-provided sig hints.
    #[arg(long, value_name = "FILE")]
    pub hints: PathBuf,
}

/// Execute the identify subcommand.
pub fn run_identify(args: &IdentifyArgs, config: &IdentifyConfig) -> Result<u8> {
    let mut table = crate::load_table(&args.chain, config.bitcoin_network)?;
    let hints = SigHints::from_path(&args.hints)
        .with_context(|| format!("failed to load hints: {}", args.hints.display()))?;
    tracing::debug!(hints = hints.len(), links = table.len(), "loaded inputs");

    let mut identifier = Identifier::new(
        Arc::new(hints),
        Arc::new(HintOnlyCheckerFactory),
        Arc::new(StdoutSink),
    )
    .with_config(config.clone());
    if config.cache_enabled {
        identifier = identifier.with_cache(Arc::new(MemoryProofCache::new(config.cache_ttl_secs)));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match runtime.block_on(identifier.identify(&mut table)) {
        Ok(()) => Ok(0),
        Err(e @ IdentifyError::ProofsFailed { failed }) => {
            tracing::error!(failed, "{e}");
            Ok(2)
        }
    }
}
