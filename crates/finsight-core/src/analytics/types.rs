//! Output records produced by the analytics engine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::iso_date;

/// Direction of a category's monthly spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionData {
    pub category: String,
    /// Never negative
    pub predicted_amount: f64,
    /// In `[0, 0.9]` with default settings
    pub confidence: f64,
    pub trend: Trend,
    /// Mean of the category's monthly sums
    pub historical_average: f64,
}

/// Percentage change against the previous month
///
/// `None` means the previous value was zero, so no percentage exists.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentChange {
    pub income: Option<f64>,
    pub expenses: Option<f64>,
    pub balance: Option<f64>,
}

impl PercentChange {
    /// Change recorded for the oldest month in a window
    pub fn zero() -> Self {
        Self {
            income: Some(0.0),
            expenses: Some(0.0),
            balance: Some(0.0),
        }
    }
}

/// Income, expenses and balance for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    /// `YYYY-MM`
    pub key: String,
    /// Display label, e.g. "March 2024"
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub balance: f64,
    pub change_from_previous: PercentChange,
}

/// Flows and reconstructed balance for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowData {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub net_flow: f64,
    pub running_balance: f64,
}

/// How far an expense sits from its category's typical amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalySeverity::Low => "low",
            AnomalySeverity::Medium => "medium",
            AnomalySeverity::High => "high",
        }
    }

    /// Fixed human-readable description for an anomaly in `category`
    pub fn describe(&self, category: &str) -> String {
        match self {
            AnomalySeverity::High => format!(
                "Very unusual {} transaction, far outside your normal spending",
                category
            ),
            AnomalySeverity::Medium => format!(
                "{} transaction is noticeably different from your usual pattern",
                category
            ),
            AnomalySeverity::Low => format!(
                "{} transaction is slightly outside your usual range",
                category
            ),
        }
    }
}

impl fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnomalySeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AnomalySeverity::Low),
            "medium" => Ok(AnomalySeverity::Medium),
            "high" => Ok(AnomalySeverity::High),
            _ => Err(format!("Unknown anomaly severity: {}", s)),
        }
    }
}

/// An expense flagged as a statistical outlier within its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetection {
    pub transaction_id: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    /// Category mean
    pub average_amount: f64,
    /// z-score magnitude
    pub deviation: f64,
    pub severity: AnomalySeverity,
    pub description: String,
}

/// All four analyses over one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// See [`crate::models::Snapshot::fingerprint`]
    pub fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub transaction_count: usize,
    pub total_balance: f64,
    pub predictions: Vec<PredictionData>,
    pub months: Vec<MonthComparison>,
    pub cash_flow: Vec<CashFlowData>,
    pub anomalies: Vec<AnomalyDetection>,
}
