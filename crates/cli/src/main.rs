//! stockroom - interactive stock ledger.
//!
//! # Usage
//!
//! ```bash
//! stockroom
//! stockroom --data-file /var/lib/stock/inventory.json
//! RUST_LOG=info stockroom
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stockroom_cli::{Outcome, Shell};
use stockroom_infra::config::DEFAULT_DATA_FILE;
use stockroom_infra::{InventoryStore, StoreConfig};

/// Track products, stock entries and exits in a local JSON file.
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File the inventory is loaded from and saved to
    #[arg(long, value_name = "PATH", env = "STOCKROOM_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Log filter used when RUST_LOG is unset (logs go to stderr)
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    stockroom_observability::init(&args.log);

    match run(&args) {
        Ok(Outcome::Saved | Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::UnsavedChanges) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let config = StoreConfig::new(&args.data_file);
    let store = config.open();
    let loaded = store
        .load()
        .with_context(|| format!("failed to load inventory from {}", args.data_file.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(loaded.inventory, &store, stdin.lock(), stdout.lock());

    if let Some(warning) = loaded.warning {
        shell.notice(&warning.to_string())?;
    }

    shell.run().context("terminal I/O failed")
}
