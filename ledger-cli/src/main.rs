//! # split-ledger CLI Entry Point
//!
//! Loads configuration, imports an optional ledger file and hands stdin and
//! stdout to the interactive shell.

use anyhow::Context;
use clap::Parser;
use ledger_cli::{AppConfig, Shell};
use ledger_core::Ledger;
use settlement::NettingEngine;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared-expense ledger: record who paid whom and settle up.
#[derive(Parser, Debug)]
#[command(name = "split-ledger", version, about)]
struct Cli {
    /// Ledger file to import before starting
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the `v` command saves the ledger
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.ledger.export_path = output;
    }

    // Initialize tracing; stderr keeps prompts on stdout readable
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.ledger.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::info!(
        service = %config.ledger.service_name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting split-ledger"
    );

    let engine = NettingEngine::from_config(&config.settlement.netting)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(
        Ledger::new(),
        engine,
        config.ledger.export_path,
        stdin.lock(),
        stdout.lock(),
    );

    if let Some(path) = &cli.file {
        shell.import(path)?;
    }

    shell.run()?;

    tracing::info!(transactions = shell.ledger().len(), "Shutting down");
    Ok(())
}
