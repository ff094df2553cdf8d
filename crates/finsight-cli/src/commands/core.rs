//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_engine` - Build the analytics engine from config
//! - `load_data` - Load the snapshot (and optional accounts file)
//! - `cmd_config` - Show the effective configuration

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::config::default_config_path;
use finsight_core::{load_accounts, load_snapshot, AnalyticsConfig, FinancialAnalytics, Snapshot};
use serde::Serialize;
use tracing::warn;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}

/// Print a serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Resolve config (explicit path, data-dir override, built-ins) into an engine
pub fn load_engine(config_path: Option<&Path>) -> Result<FinancialAnalytics> {
    let config = load_config(config_path)?;
    Ok(FinancialAnalytics::with_config(config))
}

fn load_config(config_path: Option<&Path>) -> Result<AnalyticsConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                warn!(path = %path.display(), "Config file not found, using defaults");
            }
            AnalyticsConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => AnalyticsConfig::load().context("Failed to load analytics config"),
    }
}

/// Load the snapshot, merging a separate accounts file when given
pub fn load_data(data_path: &Path, accounts_path: Option<&Path>) -> Result<Snapshot> {
    let mut snapshot = load_snapshot(data_path)
        .with_context(|| format!("Failed to load snapshot {}", data_path.display()))?;

    if let Some(path) = accounts_path {
        let accounts = load_accounts(path)
            .with_context(|| format!("Failed to load accounts {}", path.display()))?;
        if !snapshot.accounts.is_empty() {
            warn!(
                replaced = snapshot.accounts.len(),
                "--accounts overrides accounts in the snapshot"
            );
        }
        snapshot.accounts = accounts;
    }

    if snapshot.accounts.is_empty() {
        warn!("No accounts loaded; cash flow balances are anchored at 0");
    }

    Ok(snapshot)
}

pub fn cmd_config(config_path: Option<&Path>, path_only: bool, output: Output) -> Result<()> {
    let override_path = config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    if path_only {
        match override_path {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No platform data directory available"),
        }
        return Ok(());
    }

    let config = load_config(config_path)?;

    if output == Output::Json {
        return print_json(&config);
    }

    let source = match override_path {
        Some(ref path) if path.exists() => path.display().to_string(),
        _ => "built-in defaults".to_string(),
    };

    println!();
    println!("⚙️  Analytics Configuration");
    println!("   Source: {}", source);
    println!("   ─────────────────────────────────────────────────────────────");
    let p = &config.predictor;
    println!("   Predictor");
    println!("     months ahead:        {}", p.months_ahead);
    println!("     min months:          {}", p.min_months);
    println!(
        "     confidence:          {} per month, max {}",
        p.confidence_per_month, p.max_confidence
    );
    println!(
        "     trend:               {:?} (±{} absolute, ±{:.0}% relative)",
        p.trend_mode,
        p.trend_threshold,
        p.relative_trend_threshold * 100.0
    );
    println!("   Comparator");
    println!("     months to compare:   {}", config.comparator.months_to_compare);
    println!("   Cash flow");
    println!("     days kept:           {}", config.cash_flow.days);
    let a = &config.anomalies;
    println!("   Anomalies");
    println!("     min observations:    {}", a.min_observations);
    println!(
        "     z thresholds:        low > {}, medium > {}, high > {}",
        a.z_threshold, a.medium_threshold, a.high_threshold
    );
    println!("     max results:         {}", a.max_results);

    Ok(())
}
