//! Snapshot loading from JSON and CSV exports
//!
//! Stands in for the account/transaction store: it produces the validated,
//! deserialized records the analytics engine consumes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{parse_iso_date, Account, Snapshot, Transaction, TransactionType};

/// File formats a snapshot can be loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `{ "accounts": [...], "transactions": [...] }`
    Json,
    /// Transactions only, one per row
    Csv,
}

impl SnapshotFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Load a snapshot file, choosing the parser by extension
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let format = SnapshotFormat::from_path(path).ok_or_else(|| {
        Error::Import(format!(
            "Unsupported snapshot file (expected .json or .csv): {}",
            path.display()
        ))
    })?;

    let reader = BufReader::new(File::open(path)?);
    let snapshot = match format {
        SnapshotFormat::Json => parse_json_snapshot(reader)?,
        SnapshotFormat::Csv => Snapshot::new(Vec::new(), parse_transactions_csv(reader)?),
    };

    info!(
        path = %path.display(),
        accounts = snapshot.accounts.len(),
        transactions = snapshot.transactions.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Load a JSON array of accounts
pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    let reader = BufReader::new(File::open(path)?);
    let accounts: Vec<Account> = serde_json::from_reader(reader)?;
    debug!(count = accounts.len(), "Loaded accounts");
    Ok(accounts)
}

/// Parse a JSON snapshot document
pub fn parse_json_snapshot<R: Read>(reader: R) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    validate_amounts(&snapshot.transactions)?;
    Ok(snapshot)
}

fn validate_amounts(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if !tx.amount.is_finite() || tx.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Transaction {} has invalid amount {} (amounts are stored unsigned)",
                tx.id, tx.amount
            )));
        }
    }
    Ok(())
}

/// Column positions resolved from the CSV header
#[derive(Debug)]
struct Columns {
    id: usize,
    date: usize,
    kind: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
    account_id: Option<usize>,
    transfer_to: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = normalize_header(h);
                names.iter().any(|n| *n == h)
            })
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| Error::Import(format!("Missing column: {}", names[0])))
        };

        Ok(Self {
            id: require(&["id"])?,
            date: require(&["date"])?,
            kind: require(&["type", "transactiontype"])?,
            category: require(&["category"])?,
            amount: require(&["amount"])?,
            description: find(&["description", "memo"]),
            account_id: find(&["accountid", "account"]),
            transfer_to: find(&["transfertoaccountid", "transferto"]),
        })
    }
}

/// Lowercase and drop separators so `accountId`, `account_id` and
/// `Account ID` all match
fn normalize_header(h: &str) -> String {
    h.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse transactions from a CSV export
///
/// Required columns: `id`, `date`, `type`, `category`, `amount`.
/// Optional: `description`, `accountId`, `transferToAccountId`.
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |i: usize, name: &str| {
            record
                .get(i)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::Import(format!("Line {}: missing {}", line, name)))
        };
        let optional = |i: Option<usize>| {
            i.and_then(|i| record.get(i))
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        let transaction_type: TransactionType = field(columns.kind, "type")?
            .parse()
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        transactions.push(Transaction {
            id: field(columns.id, "id")?.to_string(),
            amount: parse_amount(field(columns.amount, "amount")?)
                .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?,
            transaction_type,
            category: field(columns.category, "category")?.to_string(),
            description: optional(columns.description).unwrap_or_default(),
            date: parse_date(field(columns.date, "date")?)
                .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?,
            account_id: optional(columns.account_id),
            transfer_to_account_id: optional(columns.transfer_to),
        });
    }

    debug!(count = transactions.len(), "Parsed CSV transactions");
    Ok(transactions)
}

/// Parse a date string: ISO-8601 first, then common export formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    if let Ok(date) = parse_iso_date(s) {
        return Ok(date);
    }

    let formats = [
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
///
/// The sign is dropped: direction comes from the transaction type.
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}
