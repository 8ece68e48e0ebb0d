//! Types that represent the core data model, such as `Transaction` and `Goal`.
//!
//! The GAS web app returns loosely-typed JSON rows. Every record type here normalizes from a
//! `serde_json::Value` with total functions: fields are coerced to their expected primitive type
//! and absent or mistyped fields default to an empty string or zero. Normalization never fails,
//! so a shape mismatch degrades to an empty record instead of an error in the view layer.

mod amount;
mod bill;
mod goal;
mod shopping;
mod transaction;

pub use amount::Amount;
pub use bill::Bill;
pub use goal::{Goal, YearlyItem};
pub use shopping::ShoppingItem;
pub use transaction::{Transaction, TransactionKind};

use serde_json::Value;

/// Coerces a JSON field to a `String`. Strings pass through, numbers and booleans are stringified,
/// anything else (including a missing field) becomes empty.
pub(crate) fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Like [`coerce_string`] but also trims surrounding whitespace.
pub(crate) fn coerce_trimmed(value: Option<&Value>) -> String {
    coerce_string(value).trim().to_string()
}
