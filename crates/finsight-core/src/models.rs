//! Domain models for Finsight
//!
//! These mirror the records held by the transaction/account store. The
//! analytics engine only reads them; loading lives in [`crate::import`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    /// Movement between two of the user's own accounts
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry
///
/// `amount` is always stored unsigned; direction comes from `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub transfer_to_account_id: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Calendar month this transaction falls in
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Kind of account, as labelled by the store
///
/// Unknown labels deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AccountType {
    Bank,
    Cash,
    Credit,
    Savings,
    Investment,
    EWallet,
    #[default]
    Other,
}

impl From<String> for AccountType {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "bank" => Self::Bank,
            "cash" => Self::Cash,
            "credit" => Self::Credit,
            "savings" => Self::Savings,
            "investment" => Self::Investment,
            "ewallet" => Self::EWallet,
            _ => Self::Other,
        }
    }
}

/// A user account with its current settled balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub account_type: AccountType,
    /// Balance after every transaction in the store has settled (may be negative)
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// One consistent read of the account and transaction store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    /// Sum of every account balance
    pub fn total_balance(&self) -> f64 {
        total_balance(&self.accounts)
    }

    /// Stable SHA-256 over the data the analytics depend on
    ///
    /// Independent of the order records were loaded in, so it can key a
    /// cache of computed reports.
    pub fn fingerprint(&self) -> String {
        let mut transactions: Vec<&Transaction> = self.transactions.iter().collect();
        transactions.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.date.cmp(&b.date)));

        let mut accounts: Vec<&Account> = self.accounts.iter().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));

        let mut hasher = Sha256::new();
        for tx in transactions {
            hasher.update(tx.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(tx.date.to_string().as_bytes());
            hasher.update(tx.transaction_type.as_str().as_bytes());
            hasher.update(tx.category.as_bytes());
            hasher.update([0u8]);
            hasher.update(tx.amount.to_be_bytes());
        }
        hasher.update(b"accounts");
        for account in accounts {
            hasher.update(account.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(account.balance.to_be_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Sum of account balances; the anchor for cash-flow reconstruction
pub fn total_balance(accounts: &[Account]) -> f64 {
    accounts.iter().map(|a| a.balance).sum()
}

/// A calendar month bucket (`YYYY-MM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long month/year label for display, e.g. "January 2024"
    pub fn label(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| format!("Invalid month (use YYYY-MM): {}", s))?;
        Ok(Self::from_date(date))
    }
}

/// Parse an ISO-8601 date or datetime into its calendar date
///
/// Datetimes keep the date as written; no timezone conversion is applied.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // 2024-01-15T10:30:00.000
        "%Y-%m-%dT%H:%M",       // 2024-01-15T10:30
        "%Y-%m-%d %H:%M:%S%.f", // 2024-01-15 10:30:00
    ];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(Error::InvalidData(format!("Unable to parse date: {}", s)))
}

/// Serde adapter: ISO date/datetime in, `YYYY-MM-DD` out
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Store ids may arrive as strings or integers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_iso_date("2024-03-09").unwrap(), expected);
        assert_eq!(parse_iso_date("2024-03-09T23:30:00Z").unwrap(), expected);
        assert_eq!(parse_iso_date("2024-03-09T23:30:00.123+07:00").unwrap(), expected);
        assert_eq!(parse_iso_date("2024-03-09T08:15:00").unwrap(), expected);
        assert_eq!(parse_iso_date(" 2024-03-09 08:15:00 ").unwrap(), expected);
        assert!(parse_iso_date("09/03/2024x").is_err());
    }

    #[test]
    fn test_transaction_deserialize_camel_case() {
        let json = r#"{
            "id": 42,
            "amount": 12.5,
            "type": "transfer",
            "category": "Transfer",
            "description": "Move to savings",
            "date": "2024-05-01T10:00:00.000Z",
            "accountId": "acc-1",
            "transferToAccountId": "acc-2"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, "42");
        assert_eq!(tx.transaction_type, TransactionType::Transfer);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(tx.account_id.as_deref(), Some("acc-1"));
        assert_eq!(tx.transfer_to_account_id.as_deref(), Some("acc-2"));
        assert!(!tx.is_expense());
        assert!(!tx.is_income());
    }

    #[test]
    fn test_transaction_serializes_plain_date() {
        let json = r#"{"id":"t1","amount":3,"type":"expense","category":"Food","date":"2024-05-01T10:00:00Z"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["date"], "2024-05-01");
        assert_eq!(value["type"], "expense");
        assert!(value.get("accountId").is_none());
    }

    #[test]
    fn test_account_defaults() {
        let json = r#"{"id":"a1","name":"Wallet","type":"crypto","balance":-25.5}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Other);
        assert!(account.is_active);
        assert_eq!(account.balance, -25.5);

        let json = r#"{"id":7,"name":"GoPay","type":"e-wallet","balance":0,"isActive":false}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, "7");
        assert_eq!(account.account_type, AccountType::EWallet);
        assert!(!account.is_active);
    }

    #[test]
    fn test_month_key() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let key = MonthKey::from_date(date);
        assert_eq!(key.to_string(), "2024-01");
        assert_eq!(key.label(), "January 2024");
        assert_eq!("2024-01".parse::<MonthKey>().unwrap(), key);
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!(MonthKey { year: 2023, month: 12 } < key);
    }

    #[test]
    fn test_snapshot_fingerprint_order_independent() {
        let json = r#"{
            "accounts": [{"id":"a1","name":"Bank","type":"bank","balance":100}],
            "transactions": [
                {"id":"t1","amount":10,"type":"expense","category":"Food","date":"2024-01-01"},
                {"id":"t2","amount":20,"type":"income","category":"Salary","date":"2024-01-02"}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let mut reversed = snapshot.clone();
        reversed.transactions.reverse();

        assert_eq!(snapshot.fingerprint(), reversed.fingerprint());
        assert_eq!(snapshot.fingerprint().len(), 64);

        let mut changed = snapshot.clone();
        changed.accounts[0].balance = 101.0;
        assert_ne!(snapshot.fingerprint(), changed.fingerprint());
        assert_eq!(snapshot.total_balance(), 100.0);
    }
}
