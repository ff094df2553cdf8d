//! Test utilities for finsight-core
//!
//! Builders for transactions, accounts and a realistic sample snapshot,
//! shared by the core tests and (through the `test-utils` feature) the CLI
//! tests.

use chrono::NaiveDate;

use crate::models::{Account, AccountType, Snapshot, Transaction, TransactionType};

/// Build a transaction from a `YYYY-MM-DD` date
///
/// Panics on a malformed date; only meant for tests.
pub fn transaction(
    id: &str,
    date: &str,
    transaction_type: TransactionType,
    category: &str,
    amount: f64,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        transaction_type,
        category: category.to_string(),
        description: format!("{} {}", category, id),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test date must be YYYY-MM-DD"),
        account_id: Some("bank".to_string()),
        transfer_to_account_id: None,
    }
}

pub fn expense(id: &str, date: &str, category: &str, amount: f64) -> Transaction {
    transaction(id, date, TransactionType::Expense, category, amount)
}

pub fn income(id: &str, date: &str, category: &str, amount: f64) -> Transaction {
    transaction(id, date, TransactionType::Income, category, amount)
}

pub fn transfer(id: &str, date: &str, amount: f64, from: &str, to: &str) -> Transaction {
    let mut tx = transaction(id, date, TransactionType::Transfer, "Transfer", amount);
    tx.account_id = Some(from.to_string());
    tx.transfer_to_account_id = Some(to.to_string());
    tx
}

pub fn account(id: &str, balance: f64) -> Account {
    Account {
        id: id.to_string(),
        name: format!("Account {}", id),
        account_type: AccountType::Bank,
        balance,
        color: None,
        icon: None,
        is_active: true,
    }
}

/// Six months (Jan-Jun 2024) of salary, rent, groceries and transport
///
/// Food spikes to 500 in June, which is the only anomaly. Balances total 5,000.
pub fn sample_snapshot() -> Snapshot {
    let mut cash = account("cash", 500.0);
    cash.account_type = AccountType::Cash;
    let accounts = vec![account("bank", 4_500.0), cash];

    let mut transactions = Vec::new();
    for month in 1..=6 {
        let day = |d: u32| format!("2024-{:02}-{:02}", month, d);
        transactions.push(income(&format!("salary-{}", month), &day(1), "Salary", 3_000.0));
        transactions.push(expense(&format!("rent-{}", month), &day(3), "Rent", 1_200.0));
        let food = if month == 6 { 500.0 } else { 100.0 };
        transactions.push(expense(&format!("food-{}", month), &day(10), "Food", food));
        transactions.push(expense(&format!("transport-{}", month), &day(15), "Transport", 50.0));
    }
    transactions.push(transfer("move-1", "2024-03-05", 200.0, "bank", "cash"));

    Snapshot::new(accounts, transactions)
}
