//! Monthly bills.

use crate::model::{coerce_string, coerce_trimmed, Amount};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recurring monthly bill. The status is a free string owned by the sheet ("paid", "unpaid",
/// ...); the client forwards it unchanged and never validates it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: Amount,
    pub due_date: String,
    pub status: String,
}

impl Bill {
    /// Normalizes a raw `bills[]` row.
    pub fn from_value(row: &Value) -> Self {
        Self {
            id: coerce_string(row.get("id")),
            name: coerce_trimmed(row.get("name")),
            amount: Amount::coerce(row.get("amount")),
            due_date: coerce_string(row.get("dueDate")),
            status: coerce_trimmed(row.get("status")),
        }
    }
}
