//! Financial Analytics - reporting over a transaction snapshot
//!
//! Four independent, pure analyses of the same transaction history:
//!
//! - **Expense Predictor** - per-category spending projected from monthly sums
//! - **Month Comparator** - income/expenses/balance per month with deltas
//! - **Cash-Flow Reconstructor** - daily flows with a running balance rebuilt
//!   backward from current account balances
//! - **Anomaly Detector** - expenses that are z-score outliers in their category
//!
//! None of them perform I/O or keep state; each call recomputes from scratch.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finsight_core::analytics::FinancialAnalytics;
//!
//! let engine = FinancialAnalytics::new();
//! let report = engine.analyze(&snapshot);
//! ```

pub mod anomaly;
pub mod cash_flow;
pub mod comparator;
pub mod engine;
pub mod predictor;
pub mod stats;
pub mod types;

use crate::config::{AnalyticsConfig, AnomalyConfig, PredictorConfig};
use crate::models::{Account, Transaction};

pub use engine::FinancialAnalytics;
pub use types::{
    AnalyticsReport, AnomalyDetection, AnomalySeverity, CashFlowData, MonthComparison,
    PercentChange, PredictionData, Trend,
};

/// Months projected ahead by default
pub const DEFAULT_MONTHS_AHEAD: u32 = 3;
/// Months compared by default
pub const DEFAULT_MONTHS_TO_COMPARE: usize = 6;

/// Project per-category spending `months_ahead` months out (default thresholds)
pub fn predict_expenses(transactions: &[Transaction], months_ahead: u32) -> Vec<PredictionData> {
    predictor::predict(transactions, months_ahead, &PredictorConfig::default())
}

/// Compare the most recent `months_to_compare` months, newest first
pub fn compare_months(transactions: &[Transaction], months_to_compare: usize) -> Vec<MonthComparison> {
    comparator::compare(transactions, months_to_compare)
}

/// Daily cash flow for the last 30 active days, anchored to `accounts`
pub fn analyze_cash_flow(transactions: &[Transaction], accounts: &[Account]) -> Vec<CashFlowData> {
    cash_flow::analyze(
        transactions,
        accounts,
        AnalyticsConfig::default().cash_flow.days,
    )
}

/// The 10 most recent outlier expenses (default thresholds)
pub fn detect_anomalies(transactions: &[Transaction]) -> Vec<AnomalyDetection> {
    anomaly::detect(transactions, &AnomalyConfig::default())
}
