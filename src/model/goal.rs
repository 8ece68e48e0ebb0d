//! Savings goals and yearly budget items.

use crate::model::{coerce_string, coerce_trimmed, Amount};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A savings goal, e.g. "emergency fund, 10,000".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target: Amount,
    pub note: String,
}

impl Goal {
    /// Normalizes a raw `goals[]` row. Name and note are trimmed.
    pub fn from_value(row: &Value) -> Self {
        Self {
            id: coerce_string(row.get("id")),
            name: coerce_trimmed(row.get("goalName")),
            target: Amount::coerce(row.get("goalTarget")),
            note: coerce_trimmed(row.get("goalNote")),
        }
    }
}

/// A recurring yearly expense, e.g. car insurance. The goals view derives a monthly cost from
/// the sum of these.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct YearlyItem {
    pub id: String,
    pub name: String,
    pub amount: Amount,
}

impl YearlyItem {
    /// Normalizes a raw `yearlyItems[]` row.
    pub fn from_value(row: &Value) -> Self {
        Self {
            id: coerce_string(row.get("id")),
            name: coerce_trimmed(row.get("yearlyName")),
            amount: Amount::coerce(row.get("yearlyAmount")),
        }
    }
}
