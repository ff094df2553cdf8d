//! Finsight CLI - Personal finance analytics
//!
//! Usage:
//!   finsight --data snapshot.json report       Run every analysis
//!   finsight --data tx.csv --accounts a.json cashflow
//!   finsight predict --months-ahead 6          Spending forecast
//!   finsight anomalies --json                  Machine-readable output

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let output = if cli.json {
        commands::Output::Json
    } else {
        commands::Output::Table
    };

    let load = || -> Result<_> {
        let engine = commands::load_engine(cli.config.as_deref())?;
        let snapshot = commands::load_data(&cli.data, cli.accounts.as_deref())?;
        Ok((engine, snapshot))
    };

    match cli.command {
        Commands::Predict { months_ahead } => {
            let (engine, snapshot) = load()?;
            commands::cmd_predict(&engine, &snapshot, months_ahead, output)
        }
        Commands::Compare { months } => {
            let (engine, snapshot) = load()?;
            commands::cmd_compare(&engine, &snapshot, months, output)
        }
        Commands::Cashflow => {
            let (engine, snapshot) = load()?;
            commands::cmd_cashflow(&engine, &snapshot, output)
        }
        Commands::Anomalies => {
            let (engine, snapshot) = load()?;
            commands::cmd_anomalies(&engine, &snapshot, output)
        }
        Commands::Report => {
            let (engine, snapshot) = load()?;
            commands::cmd_report(&engine, &snapshot, output)
        }
        Commands::Config { path } => commands::cmd_config(cli.config.as_deref(), path, output),
    }
}
