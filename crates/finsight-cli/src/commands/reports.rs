//! Report command implementations

use anyhow::Result;
use chrono::Local;
use finsight_core::{
    AnomalyDetection, CashFlowData, FinancialAnalytics, MonthComparison, PredictionData, Snapshot,
};

use super::{format_change, print_json, truncate, Output};

pub fn cmd_predict(
    engine: &FinancialAnalytics,
    snapshot: &Snapshot,
    months_ahead: Option<u32>,
    output: Output,
) -> Result<()> {
    let months_ahead = months_ahead.unwrap_or(engine.config().predictor.months_ahead);
    let predictions = engine.predict_expenses(&snapshot.transactions, months_ahead);

    match output {
        Output::Json => print_json(&predictions),
        Output::Table => {
            print_predictions(&predictions, months_ahead);
            Ok(())
        }
    }
}

pub fn cmd_compare(
    engine: &FinancialAnalytics,
    snapshot: &Snapshot,
    months: Option<usize>,
    output: Output,
) -> Result<()> {
    let months = months.unwrap_or(engine.config().comparator.months_to_compare);
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }
    let comparisons = engine.compare_months(&snapshot.transactions, months);

    match output {
        Output::Json => print_json(&comparisons),
        Output::Table => {
            print_comparisons(&comparisons);
            Ok(())
        }
    }
}

pub fn cmd_cashflow(
    engine: &FinancialAnalytics,
    snapshot: &Snapshot,
    output: Output,
) -> Result<()> {
    let series = engine.analyze_cash_flow(&snapshot.transactions, &snapshot.accounts);

    match output {
        Output::Json => print_json(&series),
        Output::Table => {
            print_cash_flow(&series, snapshot.total_balance());
            Ok(())
        }
    }
}

pub fn cmd_anomalies(
    engine: &FinancialAnalytics,
    snapshot: &Snapshot,
    output: Output,
) -> Result<()> {
    let anomalies = engine.detect_anomalies(&snapshot.transactions);

    match output {
        Output::Json => print_json(&anomalies),
        Output::Table => {
            print_anomalies(&anomalies);
            Ok(())
        }
    }
}

pub fn cmd_report(engine: &FinancialAnalytics, snapshot: &Snapshot, output: Output) -> Result<()> {
    let report = engine.analyze(snapshot);

    if output == Output::Json {
        return print_json(&report);
    }

    println!();
    println!("📒 Finsight Report");
    println!(
        "   Generated: {}",
        report.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!(
        "   Snapshot: {} transactions, balance {:.2} ({})",
        report.transaction_count,
        report.total_balance,
        &report.fingerprint[..12]
    );

    print_predictions(&report.predictions, engine.config().predictor.months_ahead);
    print_comparisons(&report.months);
    print_cash_flow(&report.cash_flow, report.total_balance);
    print_anomalies(&report.anomalies);

    Ok(())
}

fn print_predictions(predictions: &[PredictionData], months_ahead: u32) {
    println!();
    println!("🔮 Expense Predictions ({} months ahead)", months_ahead);
    println!("   ─────────────────────────────────────────────────────────────");

    if predictions.is_empty() {
        println!("   Not enough history (need 2+ months of expenses per category).");
        return;
    }

    println!(
        "   {:22} │ {:>10} │ {:>10} │ {:10} │ {:>5}",
        "Category", "Predicted", "Average", "Trend", "Conf"
    );
    println!("   ───────────────────────┼────────────┼────────────┼────────────┼──────");

    for p in predictions {
        let arrow = match p.trend {
            finsight_core::Trend::Increasing => "↑",
            finsight_core::Trend::Decreasing => "↓",
            finsight_core::Trend::Stable => "→",
        };
        println!(
            "   {:22} │ {:>10.2} │ {:>10.2} │ {} {:8} │ {:>4.0}%",
            truncate(&p.category, 22),
            p.predicted_amount,
            p.historical_average,
            arrow,
            p.trend.as_str(),
            p.confidence * 100.0
        );
    }
}

fn print_comparisons(comparisons: &[MonthComparison]) {
    println!();
    println!("📅 Month Comparison");
    println!("   ─────────────────────────────────────────────────────────────");

    if comparisons.is_empty() {
        println!("   No income or expenses found.");
        return;
    }

    println!(
        "   {:16} │ {:>10} │ {:>8} │ {:>10} │ {:>8} │ {:>10} │ {:>8}",
        "Month", "Income", "Δ", "Expenses", "Δ", "Balance", "Δ"
    );
    println!(
        "   ─────────────────┼────────────┼──────────┼────────────┼──────────┼────────────┼─────────"
    );

    for m in comparisons {
        println!(
            "   {:16} │ {:>10.2} │ {:>8} │ {:>10.2} │ {:>8} │ {:>10.2} │ {:>8}",
            truncate(&m.month, 16),
            m.income,
            format_change(m.change_from_previous.income),
            m.expenses,
            format_change(m.change_from_previous.expenses),
            m.balance,
            format_change(m.change_from_previous.balance)
        );
    }
}

fn print_cash_flow(series: &[CashFlowData], total_balance: f64) {
    println!();
    println!("💵 Cash Flow");
    println!("   Current balance: {:.2}", total_balance);
    println!("   ─────────────────────────────────────────────────────────────");

    if series.is_empty() {
        println!("   No income or expenses found.");
        return;
    }

    println!(
        "   {:10} │ {:>10} │ {:>10} │ {:>10} │ {:>12}",
        "Date", "Income", "Expenses", "Net", "Balance"
    );
    println!("   ───────────┼────────────┼────────────┼────────────┼─────────────");

    for day in series {
        println!(
            "   {:10} │ {:>10.2} │ {:>10.2} │ {:>+10.2} │ {:>12.2}",
            day.date.format("%Y-%m-%d").to_string(),
            day.income,
            day.expenses,
            day.net_flow,
            day.running_balance
        );
    }

    let net: f64 = series.iter().map(|d| d.net_flow).sum();
    println!("   ───────────┼────────────┼────────────┼────────────┼─────────────");
    println!("   {:10} │ {:>10} │ {:>10} │ {:>+10.2} │", "Total", "", "", net);
}

fn print_anomalies(anomalies: &[AnomalyDetection]) {
    println!();
    println!("🚨 Unusual Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    if anomalies.is_empty() {
        println!("   Nothing unusual found.");
        return;
    }

    for a in anomalies {
        let icon = match a.severity {
            finsight_core::AnomalySeverity::High => "🔴",
            finsight_core::AnomalySeverity::Medium => "🟠",
            finsight_core::AnomalySeverity::Low => "🟡",
        };
        println!(
            "   {} {} {:18} {:>10.2} (avg {:.2}, {:.1}σ)",
            icon,
            a.date.format("%Y-%m-%d"),
            truncate(&a.category, 18),
            a.amount,
            a.average_amount,
            a.deviation
        );
        println!("      {}", a.description);
    }
}
