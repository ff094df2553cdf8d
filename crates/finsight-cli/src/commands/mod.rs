//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_engine, load_data, output mode) and `config`
//! - `reports` - Analytics reports (predict, compare, cashflow, anomalies, report)

pub mod core;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional percentage change for a table cell
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}
