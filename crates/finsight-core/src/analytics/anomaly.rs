//! Anomaly Detector
//!
//! Flags expenses whose amount sits far from their category's typical
//! amount, measured as a z-score against the category's population mean and
//! standard deviation.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::config::AnomalyConfig;
use crate::models::Transaction;

use super::stats::{mean, population_std_dev};
use super::types::{AnomalyDetection, AnomalySeverity};

/// Per-category distribution of expense amounts
#[derive(Debug, Clone, Copy)]
struct CategoryStats {
    mean: f64,
    std_dev: f64,
}

/// Detect outlier expenses, most recent first
pub fn detect(transactions: &[Transaction], config: &AnomalyConfig) -> Vec<AnomalyDetection> {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|tx| tx.is_expense()).collect();

    let mut amounts: HashMap<&str, Vec<f64>> = HashMap::new();
    for tx in &expenses {
        amounts.entry(tx.category.as_str()).or_default().push(tx.amount);
    }

    let mut stats: HashMap<&str, CategoryStats> = HashMap::new();
    for (category, values) in &mut amounts {
        if values.len() < config.min_observations {
            continue;
        }
        // Fixed summation order keeps results independent of input order
        values.sort_by(|a, b| a.total_cmp(b));
        let std_dev = population_std_dev(values);
        // Identical amounts: every z-score would be undefined
        if std_dev <= f64::EPSILON {
            debug!(category, "Skipping category with no variation");
            continue;
        }
        stats.insert(
            *category,
            CategoryStats {
                mean: mean(values),
                std_dev,
            },
        );
    }

    let mut anomalies: Vec<AnomalyDetection> = Vec::new();
    for tx in expenses {
        let Some(cat) = stats.get(tx.category.as_str()) else {
            continue;
        };

        let deviation = (tx.amount - cat.mean).abs() / cat.std_dev;
        let Some(severity) = classify(deviation, config) else {
            continue;
        };

        anomalies.push(AnomalyDetection {
            transaction_id: tx.id.clone(),
            date: tx.date,
            category: tx.category.clone(),
            amount: tx.amount,
            average_amount: cat.mean,
            deviation,
            severity,
            description: severity.describe(&tx.category),
        });
    }

    anomalies.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.deviation.partial_cmp(&a.deviation).unwrap_or(Ordering::Equal))
            .then_with(|| a.transaction_id.cmp(&b.transaction_id))
    });
    anomalies.truncate(config.max_results);

    debug!(
        categories = stats.len(),
        count = anomalies.len(),
        "Anomaly detection complete"
    );
    anomalies
}

/// Severity band for a deviation, `None` when it is not anomalous
fn classify(deviation: f64, config: &AnomalyConfig) -> Option<AnomalySeverity> {
    if deviation > config.high_threshold {
        Some(AnomalySeverity::High)
    } else if deviation > config.medium_threshold {
        Some(AnomalySeverity::Medium)
    } else if deviation > config.z_threshold {
        Some(AnomalySeverity::Low)
    } else {
        None
    }
}
