//! # idtab CLI entry point
//!
//! Parses command-line arguments, installs logging, loads configuration,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idtab_cli::identify::{run_identify, IdentifyArgs};
use idtab_cli::show::{run_show, ShowArgs};
use idtab_verify::IdentifyConfig;

/// Identity table toolkit.
///
/// Classifies a signature chain's links, resolves which identity claims
/// are active, and verifies them against server-provided hints.
#[derive(Parser, Debug)]
#[command(name = "idtab", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the classified chain and its active claims.
    Show(ShowArgs),

    /// Verify the active proofs against a sig-hints file.
    Identify(IdentifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::debug!("idtab CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match IdentifyConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Show(args) => run_show(&args, &config),
        Commands::Identify(args) => run_identify(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
