//! # idtab-cli — Identity Table CLI
//!
//! Provides the `idtab` command-line interface.
//!
//! ## Subcommands
//!
//! - `idtab show` — print every link of a chain and the active claims.
//! - `idtab identify` — verify active proofs against a sig-hints file.
//!
//! ```bash
//! idtab show --chain max.chain.json
//! idtab -v identify --chain max.chain.json --hints max.hints.json
//! ```

pub mod identify;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use idtab_core::{BitcoinNetwork, Base58CheckDecoder, SigChain};
use idtab_table::{Classifier, IdentityTable};

/// Load a chain file and build its identity table.
pub fn load_table(chain: &Path, network: BitcoinNetwork) -> Result<IdentityTable> {
    let chain = SigChain::from_path(chain)
        .with_context(|| format!("failed to load chain: {}", chain.display()))?;
    let classifier = Classifier::new(Box::new(Base58CheckDecoder), network);
    Ok(IdentityTable::new(&chain, &classifier))
}
