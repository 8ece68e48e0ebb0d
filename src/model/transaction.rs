//! The `Transaction` record and its normalization from the loosely-typed rows the web app sends.

use crate::model::{coerce_string, Amount};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a transaction is money in or money out.
///
/// The spreadsheet stores the type as a free string, so anything other than the two known values
/// normalizes to `Unknown`. `Unknown` transactions still count in the "all" chart mode but are
/// excluded by the income and expense filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    #[default]
    #[serde(other)]
    Unknown,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

impl TransactionKind {
    fn from_raw(raw: &str) -> Self {
        match raw {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            _ => TransactionKind::Unknown,
        }
    }
}

/// Represents a single income or expense movement, owned by the remote spreadsheet. The client
/// never mutates an existing transaction; it only creates new ones or deletes by id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    /// Free-text labels. A transaction may carry several; they are not required to be unique.
    pub categories: Vec<String>,
    pub amount: Amount,
    pub note: String,
    pub source: String,
    /// Kept as the raw string the server sent. Parse on demand with [`Transaction::parsed_timestamp`].
    pub timestamp: String,
}

impl Transaction {
    /// Normalizes a raw row. Coerces every field, defaulting absent ones; a non-array
    /// `categories` field normalizes to an empty list.
    pub fn from_value(row: &Value) -> Self {
        let categories = match row.get("categories") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| coerce_string(Some(item)))
                .collect(),
            _ => Vec::new(),
        };

        // Older versions of the sheet used `time` or `ts` for the timestamp column.
        let timestamp = ["timestamp", "time", "ts"]
            .iter()
            .map(|key| coerce_string(row.get(*key)))
            .find(|s| !s.is_empty())
            .unwrap_or_default();

        Self {
            id: coerce_string(row.get("id")),
            kind: TransactionKind::from_raw(&coerce_string(row.get("type"))),
            categories,
            amount: Amount::coerce(row.get("amount")),
            note: coerce_string(row.get("note")),
            source: coerce_string(row.get("source")),
            timestamp,
        }
    }

    /// Parses the timestamp, trying RFC 3339 and the two date formats the sheet has used over
    /// time. Returns `None` when the value is missing or unparsable.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(dt);
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_from_value_complete_row() {
        let tx = Transaction::from_value(&json!({
            "id": "tx1",
            "type": "expense",
            "categories": ["food", "family"],
            "amount": 120.5,
            "note": "groceries",
            "source": "",
            "timestamp": "2025-03-02T10:15:00Z",
        }));
        assert_eq!(tx.id, "tx1");
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.categories, vec!["food", "family"]);
        assert_eq!(tx.amount.to_string(), "120.50");
        assert_eq!(tx.note, "groceries");
    }

    #[test]
    fn test_from_value_defaults() {
        let tx = Transaction::from_value(&json!({}));
        assert_eq!(tx.id, "");
        assert_eq!(tx.kind, TransactionKind::Unknown);
        assert!(tx.categories.is_empty());
        assert!(tx.amount.is_zero());
        assert_eq!(tx.timestamp, "");
    }

    #[test]
    fn test_from_value_coercions() {
        // Numeric id, string amount, mixed-type category entries.
        let tx = Transaction::from_value(&json!({
            "id": 17,
            "type": "income",
            "categories": ["salary", 5],
            "amount": "1,000.00",
        }));
        assert_eq!(tx.id, "17");
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(tx.categories, vec!["salary", "5"]);
        assert_eq!(tx.amount.to_string(), "1000.00");
    }

    #[test]
    fn test_non_array_categories_normalize_to_empty() {
        let tx = Transaction::from_value(&json!({ "categories": "[\"food\"]" }));
        assert!(tx.categories.is_empty());
    }

    #[test]
    fn test_unrecognized_type_is_unknown() {
        let tx = Transaction::from_value(&json!({ "type": "transfer" }));
        assert_eq!(tx.kind, TransactionKind::Unknown);
    }

    #[test]
    fn test_timestamp_fallback_keys() {
        let tx = Transaction::from_value(&json!({ "time": "2025-01-05 08:30:00" }));
        assert_eq!(tx.timestamp, "2025-01-05 08:30:00");
        let tx = Transaction::from_value(&json!({ "ts": "2025-01-06" }));
        assert_eq!(tx.timestamp, "2025-01-06");
    }

    #[test]
    fn test_parsed_timestamp_formats() {
        let mut tx = Transaction::default();

        tx.timestamp = "2025-03-02T10:15:00Z".to_string();
        let dt = tx.parsed_timestamp().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 3, 2));
        assert_eq!(dt.hour(), 10);

        tx.timestamp = "2025-03-02 10:15:00".to_string();
        assert!(tx.parsed_timestamp().is_some());

        tx.timestamp = "2025-03-02".to_string();
        let dt = tx.parsed_timestamp().unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parsed_timestamp_unparsable() {
        let mut tx = Transaction::default();
        assert!(tx.parsed_timestamp().is_none());
        tx.timestamp = "soonish".to_string();
        assert!(tx.parsed_timestamp().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
    }
}
