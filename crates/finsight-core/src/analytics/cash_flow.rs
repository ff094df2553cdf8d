//! Cash-Flow Reconstructor
//!
//! Builds a daily income/expense series and reconstructs what the total
//! balance was on each day by walking backward from today's account
//! balances.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{total_balance, Account, Transaction, TransactionType};

use super::types::CashFlowData;

#[derive(Debug, Default, Clone, Copy)]
struct DayTotals {
    income: f64,
    expenses: f64,
}

/// Daily cash flow for the most recent `days` days that have activity
///
/// The newest day's running balance is the sum of `accounts` balances; each
/// older day's balance is the newer day's balance minus the newer day's net
/// flow. Returned in ascending date order.
pub fn analyze(transactions: &[Transaction], accounts: &[Account], days: usize) -> Vec<CashFlowData> {
    let mut by_day: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Income => by_day.entry(tx.date).or_default().income += tx.amount,
            TransactionType::Expense => by_day.entry(tx.date).or_default().expenses += tx.amount,
            TransactionType::Transfer => {}
        }
    }

    let anchor = total_balance(accounts);
    let mut running_balance = anchor;

    let mut series: Vec<CashFlowData> = Vec::with_capacity(by_day.len().min(days));
    for (date, totals) in by_day.into_iter().rev().take(days) {
        let net_flow = totals.income - totals.expenses;
        series.push(CashFlowData {
            date,
            income: totals.income,
            expenses: totals.expenses,
            net_flow,
            running_balance,
        });
        running_balance -= net_flow;
    }
    series.reverse();

    debug!(days = series.len(), anchor, "Cash flow reconstruction complete");
    series
}
