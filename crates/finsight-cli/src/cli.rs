//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Finsight - Analytics for your personal finance history
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Spending predictions, month comparisons, cash flow and anomalies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file: .json (accounts + transactions) or .csv (transactions only)
    #[arg(long, default_value = "snapshot.json", global = true)]
    pub data: PathBuf,

    /// Accounts JSON array, used to anchor cash flow when --data is a CSV
    #[arg(long, global = true)]
    pub accounts: Option<PathBuf>,

    /// Analytics config TOML (defaults to the data-dir override, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict upcoming spending per category
    Predict {
        /// Months to project ahead (defaults to config, 3)
        #[arg(short, long)]
        months_ahead: Option<u32>,
    },

    /// Compare income and expenses month over month
    Compare {
        /// Number of recent months to compare (defaults to config, 6)
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Show daily cash flow with reconstructed balances
    Cashflow,

    /// List unusual expenses
    Anomalies,

    /// Run every analysis
    Report,

    /// Show the effective analytics configuration
    Config {
        /// Only print the override file location
        #[arg(long)]
        path: bool,
    },
}
