//! # Show Subcommand
//!
//! Prints the classified chain in order, one link per line
//! (`seqno type display [revoked]`), followed by the active proofs, active
//! tracks, and the active cryptocurrency binding.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use idtab_table::{IdentityTable, TypedLink};
use idtab_verify::IdentifyConfig;

/// Arguments for the `idtab show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// JSON file holding the chain's links in order.
    #[arg(long, value_name = "FILE")]
    pub chain: PathBuf,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs, config: &IdentifyConfig) -> Result<u8> {
    let table = crate::load_table(&args.chain, config.bitcoin_network)?;
    for w in table.warnings() {
        tracing::info!("{w}");
    }
    print!("{}", render(&table));
    Ok(0)
}

/// Render a table as the show report.
pub fn render(table: &IdentityTable) -> String {
    let mut out = String::new();

    for link in table.order() {
        let _ = write!(
            out,
            "{:>4} {:<14} {}",
            link.seqno().get(),
            link.link_type(),
            link.to_display_string()
        );
        if link.is_revoked() {
            out.push_str(" [revoked]");
        }
        out.push('\n');
    }

    out.push_str("\nactive proofs:\n");
    for p in table.active_proofs() {
        let _ = writeln!(out, "  {} ({})", p.to_display_string(), p.sig_id().to_short());
    }

    let tracked = table.tracked_usernames();
    if !tracked.is_empty() {
        let _ = writeln!(out, "\ntracking: {}", tracked.join(", "));
    }

    if let Some(c) = table.active_cryptocurrency() {
        let _ = writeln!(out, "\n{}", c.display_line());
    }
    out
}
