//! Financial analytics engine - runs the analyzers over a snapshot

use chrono::Utc;
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::models::{Account, Snapshot, Transaction};

use super::types::{
    AnalyticsReport, AnomalyDetection, CashFlowData, MonthComparison, PredictionData,
};
use super::{anomaly, cash_flow, comparator, predictor};

/// Stateless entry point to the four analyses
///
/// Holds only configuration; every call recomputes from the inputs it is
/// given, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct FinancialAnalytics {
    config: AnalyticsConfig,
}

impl FinancialAnalytics {
    /// Create an engine with the built-in thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Project per-category spending `months_ahead` months out
    pub fn predict_expenses(
        &self,
        transactions: &[Transaction],
        months_ahead: u32,
    ) -> Vec<PredictionData> {
        predictor::predict(transactions, months_ahead, &self.config.predictor)
    }

    /// Month-over-month income/expense comparison, newest month first
    pub fn compare_months(
        &self,
        transactions: &[Transaction],
        months_to_compare: usize,
    ) -> Vec<MonthComparison> {
        comparator::compare(transactions, months_to_compare)
    }

    /// Daily flows with balances reconstructed from `accounts`
    pub fn analyze_cash_flow(
        &self,
        transactions: &[Transaction],
        accounts: &[Account],
    ) -> Vec<CashFlowData> {
        cash_flow::analyze(transactions, accounts, self.config.cash_flow.days)
    }

    /// Outlier expenses, most recent first
    pub fn detect_anomalies(&self, transactions: &[Transaction]) -> Vec<AnomalyDetection> {
        anomaly::detect(transactions, &self.config.anomalies)
    }

    /// Run every analysis with the configured defaults
    pub fn analyze(&self, snapshot: &Snapshot) -> AnalyticsReport {
        let transactions = &snapshot.transactions;

        let report = AnalyticsReport {
            fingerprint: snapshot.fingerprint(),
            generated_at: Utc::now(),
            transaction_count: transactions.len(),
            total_balance: snapshot.total_balance(),
            predictions: self.predict_expenses(transactions, self.config.predictor.months_ahead),
            months: self.compare_months(transactions, self.config.comparator.months_to_compare),
            cash_flow: self.analyze_cash_flow(transactions, &snapshot.accounts),
            anomalies: self.detect_anomalies(transactions),
        };

        info!(
            transactions = report.transaction_count,
            predictions = report.predictions.len(),
            months = report.months.len(),
            days = report.cash_flow.len(),
            anomalies = report.anomalies.len(),
            "Analytics run complete"
        );
        report
    }
}
