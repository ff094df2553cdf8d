//! Integration tests for finsight-core
//!
//! These tests exercise the full load → analyze → report workflow.

use std::fs;

use finsight_core::{
    import::parse_transactions_csv, load_accounts, load_snapshot, AnalyticsConfig,
    AnomalySeverity, FinancialAnalytics, Snapshot, Trend,
};

/// Four months (Jan-Apr 2024) of a simple household budget:
/// - Salary 3,000 on the 1st, Rent 1,000 on the 2nd
/// - Groceries climbing 200 → 260 by 20 a month
/// - Six Dining expenses in April, the last one a 200 splurge
/// - One transfer, which every analysis ignores
fn household_csv() -> &'static str {
    r#"id,date,type,category,amount,description,accountId,transferToAccountId
1,2024-01-01,income,Salary,3000.00,ACME PAYROLL,bank,
2,2024-01-02,expense,Rent,1000.00,LANDLORD,bank,
3,2024-01-10,expense,Groceries,200.00,MARKET,bank,
4,02/01/2024,income,Salary,"$3,000.00",ACME PAYROLL,bank,
5,02/02/2024,expense,Rent,1000.00,LANDLORD,bank,
6,02/10/2024,expense,Groceries,220.00,MARKET,bank,
7,2024-02-15,transfer,Transfer,500.00,TO SAVINGS,bank,savings
8,2024-03-01,income,Salary,3000.00,ACME PAYROLL,bank,
9,2024-03-02,expense,Rent,1000.00,LANDLORD,bank,
10,2024-03-10,expense,Groceries,240.00,MARKET,bank,
11,2024-04-01,income,Salary,3000.00,ACME PAYROLL,bank,
12,2024-04-02,expense,Rent,1000.00,LANDLORD,bank,
13,2024-04-03,expense,Dining,40.00,CAFE,bank,
14,2024-04-04,expense,Dining,40.00,CAFE,bank,
15,2024-04-05,expense,Dining,40.00,CAFE,bank,
16,2024-04-06,expense,Dining,40.00,CAFE,bank,
17,2024-04-07,expense,Dining,40.00,CAFE,bank,
18,2024-04-08,expense,Dining,200.00,STEAKHOUSE,bank,
19,2024-04-10,expense,Groceries,260.00,MARKET,bank,
"#
}

fn household_accounts() -> &'static str {
    r#"[
  {"id": "bank", "name": "Checking", "type": "bank", "balance": 4000},
  {"id": 7, "name": "Savings", "type": "savings", "balance": 1000, "isActive": false}
]"#
}

fn household_snapshot() -> Snapshot {
    let transactions = parse_transactions_csv(household_csv().as_bytes()).expect("valid CSV");
    let accounts = serde_json::from_str(household_accounts()).expect("valid accounts");
    Snapshot::new(accounts, transactions)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_csv_and_accounts_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("transactions.CSV");
    let accounts_path = dir.path().join("accounts.json");
    fs::write(&csv_path, household_csv()).unwrap();
    fs::write(&accounts_path, household_accounts()).unwrap();

    let snapshot = load_snapshot(&csv_path).expect("CSV snapshot loads");
    assert_eq!(snapshot.transactions.len(), 19);
    assert!(snapshot.accounts.is_empty());

    let accounts = load_accounts(&accounts_path).expect("accounts load");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].id, "7");
    assert!(!accounts[1].is_active);

    let salary_feb = &snapshot.transactions[3];
    assert_eq!(salary_feb.amount, 3_000.0);
    assert_eq!(salary_feb.date.to_string(), "2024-02-01");

    let transfer = &snapshot.transactions[6];
    assert_eq!(transfer.transfer_to_account_id.as_deref(), Some("savings"));
}

#[test]
fn test_json_snapshot_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{
  "accounts": [{"id": 1, "name": "Wallet", "type": "e-wallet", "balance": 250.5}],
  "transactions": [
    {"id": 1, "amount": 12.5, "type": "expense", "category": "Coffee",
     "date": "2024-05-02T08:15:00Z", "accountId": 1},
    {"id": "2", "amount": 100, "type": "income", "category": "Gift",
     "date": "2024-05-03", "description": "Birthday"}
  ]
}"#,
    )
    .unwrap();

    let snapshot = load_snapshot(&path).expect("JSON snapshot loads");
    assert_eq!(snapshot.accounts[0].id, "1");
    assert_eq!(snapshot.transactions[0].id, "1");
    assert_eq!(snapshot.transactions[0].date.to_string(), "2024-05-02");
    assert_eq!(snapshot.transactions[0].account_id.as_deref(), Some("1"));
    assert_eq!(snapshot.total_balance(), 250.5);
}

// =============================================================================
// Analytics
// =============================================================================

#[test]
fn test_predictions_for_household() {
    let snapshot = household_snapshot();
    let predictions = FinancialAnalytics::new().predict_expenses(&snapshot.transactions, 3);

    // Dining only has one month of history
    assert_eq!(predictions.len(), 2);

    let rent = &predictions[0];
    assert_eq!(rent.category, "Rent");
    assert!(approx(rent.predicted_amount, 1_000.0));
    assert_eq!(rent.trend, Trend::Stable);
    assert!(approx(rent.confidence, 0.6));

    let groceries = &predictions[1];
    assert_eq!(groceries.category, "Groceries");
    assert!(approx(groceries.historical_average, 230.0));
    assert!(approx(groceries.predicted_amount, 290.0));
    assert_eq!(groceries.trend, Trend::Increasing);
}

#[test]
fn test_month_comparison_for_household() {
    let snapshot = household_snapshot();
    let months = FinancialAnalytics::new().compare_months(&snapshot.transactions, 6);

    assert_eq!(months.len(), 4);
    assert_eq!(months[0].key, "2024-04");
    assert_eq!(months[0].month, "April 2024");
    assert!(approx(months[0].expenses, 1_660.0));
    assert!(approx(months[0].balance, 1_340.0));

    let change = &months[0].change_from_previous;
    assert!(approx(change.income.unwrap(), 0.0));
    assert!(approx(change.expenses.unwrap(), (1_660.0 - 1_240.0) / 1_240.0 * 100.0));

    // Transfers don't count as expenses
    assert!(approx(months[2].expenses, 1_220.0));

    let oldest = &months[3].change_from_previous;
    assert_eq!(oldest.income, Some(0.0));
    assert_eq!(oldest.expenses, Some(0.0));
    assert_eq!(oldest.balance, Some(0.0));
}

#[test]
fn test_cash_flow_for_household() {
    let snapshot = household_snapshot();
    let series =
        FinancialAnalytics::new().analyze_cash_flow(&snapshot.transactions, &snapshot.accounts);

    // 18 active days; the transfer day has no income or expense
    assert_eq!(series.len(), 18);

    let newest = series.last().unwrap();
    assert_eq!(newest.date.to_string(), "2024-04-10");
    assert!(approx(newest.running_balance, 5_000.0));
    assert!(approx(newest.net_flow, -260.0));

    let steakhouse = &series[series.len() - 2];
    assert_eq!(steakhouse.date.to_string(), "2024-04-08");
    assert!(approx(steakhouse.running_balance, 5_260.0));

    let oldest = &series[0];
    assert_eq!(oldest.date.to_string(), "2024-01-01");
    assert!(approx(oldest.running_balance, 1_320.0));

    for pair in series.windows(2) {
        assert!(pair[0].date < pair[1].date);
        assert!(approx(
            pair[0].running_balance,
            pair[1].running_balance - pair[1].net_flow
        ));
    }
}

#[test]
fn test_anomalies_for_household() {
    let snapshot = household_snapshot();
    let anomalies = FinancialAnalytics::new().detect_anomalies(&snapshot.transactions);

    assert_eq!(anomalies.len(), 1);
    let splurge = &anomalies[0];
    assert_eq!(splurge.transaction_id, "18");
    assert_eq!(splurge.category, "Dining");
    assert!(approx(splurge.average_amount, 400.0 / 6.0));
    assert!((splurge.deviation - 5f64.sqrt()).abs() < 1e-9);
    assert_eq!(splurge.severity, AnomalySeverity::Low);
}

#[test]
fn test_custom_config_changes_results() {
    let config = AnalyticsConfig::from_toml(
        r#"
[predictor]
min_months = 4
trend_mode = "relative"
relative_trend_threshold = 0.1

[comparator]
months_to_compare = 2

[cash_flow]
days = 5

[anomalies]
min_observations = 7
"#,
    )
    .expect("valid config");

    let snapshot = household_snapshot();
    let report = FinancialAnalytics::with_config(config).analyze(&snapshot);

    // 20 / 230 is under the 10% relative threshold
    let groceries = report
        .predictions
        .iter()
        .find(|p| p.category == "Groceries")
        .unwrap();
    assert_eq!(groceries.trend, Trend::Stable);

    assert_eq!(report.months.len(), 2);
    assert_eq!(report.cash_flow.len(), 5);
    assert!(report.anomalies.is_empty());
}

// =============================================================================
// Full Report
// =============================================================================

#[test]
fn test_full_report_is_deterministic() {
    let snapshot = household_snapshot();
    let engine = FinancialAnalytics::new();

    let first = engine.analyze(&snapshot);

    let mut shuffled = snapshot.clone();
    shuffled.transactions.reverse();
    shuffled.accounts.reverse();
    let second = engine.analyze(&shuffled);

    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.transaction_count, 19);
    assert!(approx(first.total_balance, 5_000.0));
    assert_eq!(first.predictions, second.predictions);
    assert_eq!(first.months, second.months);
    assert_eq!(first.cash_flow, second.cash_flow);
    assert_eq!(first.anomalies, second.anomalies);

    let json = serde_json::to_value(&first).unwrap();
    assert!(json["generatedAt"].is_string());
    assert_eq!(json["predictions"][0]["predictedAmount"], 1_000.0);
    assert_eq!(json["anomalies"][0]["severity"], "low");
    assert_eq!(json["cashFlow"][17]["date"], "2024-04-10");
}
