//! Month Comparator
//!
//! Aggregates income and expenses per calendar month and reports each
//! month's change against the month before it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{MonthKey, Transaction, TransactionType};

use super::stats::percent_change;
use super::types::{MonthComparison, PercentChange};

#[derive(Debug, Default, Clone, Copy)]
struct MonthTotals {
    income: f64,
    expenses: f64,
}

impl MonthTotals {
    fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Compare the most recent `months_to_compare` months, newest first
///
/// Each month is compared with the next older month inside the window; the
/// oldest month in the window reports zero change. Transfers are ignored.
pub fn compare(transactions: &[Transaction], months_to_compare: usize) -> Vec<MonthComparison> {
    let mut by_month: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();
    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Income => by_month.entry(tx.month()).or_default().income += tx.amount,
            TransactionType::Expense => {
                by_month.entry(tx.month()).or_default().expenses += tx.amount
            }
            TransactionType::Transfer => {}
        }
    }

    let window: Vec<(MonthKey, MonthTotals)> = by_month
        .into_iter()
        .rev()
        .take(months_to_compare)
        .collect();

    let comparisons: Vec<MonthComparison> = window
        .iter()
        .enumerate()
        .map(|(i, (key, current))| {
            let change_from_previous = match window.get(i + 1) {
                Some((_, previous)) => PercentChange {
                    income: percent_change(current.income, previous.income),
                    expenses: percent_change(current.expenses, previous.expenses),
                    balance: percent_change(current.balance(), previous.balance()),
                },
                None => PercentChange::zero(),
            };

            MonthComparison {
                key: key.to_string(),
                month: key.label(),
                income: current.income,
                expenses: current.expenses,
                balance: current.balance(),
                change_from_previous,
            }
        })
        .collect();

    debug!(count = comparisons.len(), "Month comparison complete");
    comparisons
}
