//! Finsight Core Library
//!
//! Reporting analytics for the Finsight personal finance tracker:
//! - Domain models for accounts and transactions
//! - Expense prediction, month comparison, cash-flow reconstruction and
//!   anomaly detection over a transaction snapshot
//! - Tunable thresholds loaded from TOML
//! - Snapshot loading from JSON and CSV exports

pub mod analytics;
pub mod config;
pub mod error;
pub mod import;
pub mod models;

/// Test utilities including transaction builders and a sample snapshot
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{
    analyze_cash_flow, compare_months, detect_anomalies, predict_expenses, AnalyticsReport,
    AnomalyDetection, AnomalySeverity, CashFlowData, FinancialAnalytics, MonthComparison,
    PercentChange, PredictionData, Trend,
};
pub use config::{AnalyticsConfig, TrendMode};
pub use error::{Error, Result};
pub use import::{load_accounts, load_snapshot, SnapshotFormat};
pub use models::{Account, AccountType, MonthKey, Snapshot, Transaction, TransactionType};
