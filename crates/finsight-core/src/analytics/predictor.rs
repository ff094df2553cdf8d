//! Expense Predictor
//!
//! Projects per-category spending a few months ahead from monthly sums:
//! - historical average of the category's monthly totals
//! - least-squares trend over those totals, extrapolated `months_ahead`

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::{PredictorConfig, TrendMode};
use crate::models::{MonthKey, Transaction};

use super::stats::{mean, ols_slope};
use super::types::{PredictionData, Trend};

/// Predict spending per category `months_ahead` months out
///
/// Categories with fewer than `config.min_months` distinct months of
/// expenses are left out. Results are sorted by predicted amount, largest
/// first.
pub fn predict(
    transactions: &[Transaction],
    months_ahead: u32,
    config: &PredictorConfig,
) -> Vec<PredictionData> {
    // category -> month -> total (BTreeMap keeps months ascending)
    let mut by_category: HashMap<&str, BTreeMap<MonthKey, f64>> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        *by_category
            .entry(tx.category.as_str())
            .or_default()
            .entry(tx.month())
            .or_insert(0.0) += tx.amount;
    }

    let mut predictions: Vec<PredictionData> = Vec::new();

    for (category, months) in by_category {
        if months.len() < config.min_months {
            debug!(
                category,
                months = months.len(),
                "Skipping category with insufficient history"
            );
            continue;
        }

        let monthly: Vec<f64> = months.values().copied().collect();
        let historical_average = mean(&monthly);
        let slope = ols_slope(&monthly);

        let predicted_amount = (historical_average + slope * months_ahead as f64).max(0.0);
        let confidence =
            (monthly.len() as f64 * config.confidence_per_month).min(config.max_confidence);

        predictions.push(PredictionData {
            category: category.to_string(),
            predicted_amount,
            confidence,
            trend: classify_trend(slope, historical_average, config),
            historical_average,
        });
    }

    predictions.sort_by(|a, b| {
        b.predicted_amount
            .partial_cmp(&a.predicted_amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    debug!(count = predictions.len(), months_ahead, "Expense prediction complete");
    predictions
}

/// Label a monthly slope as increasing, decreasing or stable
pub fn classify_trend(slope: f64, historical_average: f64, config: &PredictorConfig) -> Trend {
    let (value, threshold) = match config.trend_mode {
        TrendMode::Absolute => (slope, config.trend_threshold),
        TrendMode::Relative => {
            if historical_average == 0.0 {
                return Trend::Stable;
            }
            (slope / historical_average.abs(), config.relative_trend_threshold)
        }
    };

    if value > threshold {
        Trend::Increasing
    } else if value < -threshold {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}
