//! Implements the `Transport` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the
//! whole app, top-to-bottom, without a deployed GAS web app (`BUDGET_IN_TEST_MODE`).

use crate::api::Transport;
use crate::ApiError;
use serde_json::{json, Value};

/// An in-memory stand-in for the GAS web app. It understands every action the real web app
/// does, speaks the same `{ok, ...}` envelope, and mints ids for inserted records. By default it
/// is seeded with a small data set.
pub struct TestGas {
    transactions: Vec<Value>,
    categories: Vec<Value>,
    bills: Vec<Value>,
    goals: Vec<Value>,
    yearly_items: Vec<Value>,
    shopping: Vec<Value>,
}

impl TestGas {
    /// An instance with no records at all.
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            categories: Vec::new(),
            bills: Vec::new(),
            goals: Vec::new(),
            yearly_items: Vec::new(),
            shopping: Vec::new(),
        }
    }

    fn new_id(prefix: &str) -> String {
        format!("{prefix}-{}", uuid::Uuid::new_v4())
    }

    fn ok(fields: Value) -> Result<Value, ApiError> {
        let mut envelope = json!({ "ok": true });
        if let (Some(envelope), Some(fields)) = (envelope.as_object_mut(), fields.as_object()) {
            for (key, value) in fields {
                envelope.insert(key.clone(), value.clone());
            }
        }
        Ok(envelope)
    }

    fn fail(code: &str) -> Result<Value, ApiError> {
        Ok(json!({ "ok": false, "error": code }))
    }
}

impl Default for TestGas {
    /// Loads the seed data from this module.
    fn default() -> Self {
        Self {
            transactions: seed_array(SEED_TRANSACTIONS),
            categories: seed_array(SEED_CATEGORIES),
            bills: seed_array(SEED_BILLS),
            goals: seed_array(SEED_GOALS),
            yearly_items: seed_array(SEED_YEARLY),
            shopping: seed_array(SEED_SHOPPING),
        }
    }
}

#[async_trait::async_trait]
impl Transport for TestGas {
    async fn call(&mut self, action: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        match action {
            "getTransactions" => Self::ok(json!({ "transactions": self.transactions })),
            "addTransaction" => {
                let id = Self::new_id("tx");
                let categories: Value =
                    serde_json::from_str(&param(params, "categories")).unwrap_or(json!([]));
                self.transactions.push(json!({
                    "id": id,
                    "type": param(params, "type"),
                    "categories": categories,
                    "amount": number(&param(params, "amount")),
                    "note": param(params, "note"),
                    "source": param(params, "source"),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                }));
                Self::ok(json!({ "id": id }))
            }
            "deleteTransaction" => {
                let id = param(params, "id");
                let before = self.transactions.len();
                self.transactions.retain(|tx| tx["id"] != json!(id));
                if self.transactions.len() == before {
                    return Self::fail("NOT_FOUND");
                }
                Self::ok(json!({}))
            }
            "getCategories" => Self::ok(json!({ "categories": self.categories })),
            "saveCategories" => {
                self.categories =
                    serde_json::from_str(&param(params, "categories")).unwrap_or_default();
                Self::ok(json!({}))
            }
            "getBills" => Self::ok(json!({ "bills": self.bills })),
            "addBill" => {
                let id = Self::new_id("bill");
                self.bills.push(json!({
                    "id": id,
                    "name": param(params, "name"),
                    "amount": number(&param(params, "amount")),
                    "dueDate": param(params, "dueDate"),
                    "status": param(params, "status"),
                }));
                Self::ok(json!({ "id": id }))
            }
            "updateBillStatus" => {
                let id = param(params, "billId");
                match self.bills.iter_mut().find(|bill| bill["id"] == json!(id)) {
                    Some(bill) => {
                        bill["status"] = json!(param(params, "status"));
                        Self::ok(json!({}))
                    }
                    None => Self::fail("NOT_FOUND"),
                }
            }
            "getGoalsAndYearly" => Self::ok(json!({
                "goals": self.goals,
                "yearlyItems": self.yearly_items,
            })),
            "addGoal" => {
                let id = Self::new_id("goal");
                self.goals.push(json!({
                    "id": id,
                    "goalName": param(params, "goalName"),
                    "goalTarget": number(&param(params, "goalTarget")),
                    "goalNote": param(params, "goalNote"),
                }));
                Self::ok(json!({ "id": id }))
            }
            "addYearlyItem" => {
                let id = Self::new_id("yearly");
                self.yearly_items.push(json!({
                    "id": id,
                    "yearlyName": param(params, "yearlyName"),
                    "yearlyAmount": number(&param(params, "yearlyAmount")),
                }));
                Self::ok(json!({ "id": id }))
            }
            "getShoppingList" => Self::ok(json!({ "items": self.shopping })),
            "addShoppingItem" => {
                let id = Self::new_id("item");
                self.shopping.push(json!({
                    "id": id,
                    "itemName": param(params, "itemName"),
                    "purchased": false,
                }));
                Self::ok(json!({ "id": id }))
            }
            "markShoppingPurchased" => {
                let id = param(params, "itemId");
                let Some(ix) = self
                    .shopping
                    .iter()
                    .position(|item| item["id"] == json!(id))
                else {
                    return Self::fail("NOT_FOUND");
                };
                // The real web app records the price as an expense and drops the item from the
                // pending list.
                let item = self.shopping.remove(ix);
                self.transactions.push(json!({
                    "id": Self::new_id("tx"),
                    "type": "expense",
                    "categories": ["shopping"],
                    "amount": number(&param(params, "price")),
                    "note": item["itemName"],
                    "source": "",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                }));
                Self::ok(json!({}))
            }
            _ => Self::fail("UNKNOWN_ACTION"),
        }
    }
}

/// Looks up a parameter by name, empty when absent.
fn param(params: &[(&str, String)], name: &str) -> String {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// The web app stores numbers as numbers; mirror that when echoing parameters back.
fn number(raw: &str) -> Value {
    raw.parse::<f64>().map(|v| json!(v)).unwrap_or(json!(0))
}

fn seed_array(raw: &str) -> Vec<Value> {
    match serde_json::from_str(raw) {
        Ok(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Seed transaction data.
const SEED_TRANSACTIONS: &str = r#"[
  {"id": "tx-seed-1", "type": "income", "categories": ["salary"], "amount": 6500,
   "note": "", "source": "work", "timestamp": "2025-03-01 09:00:00"},
  {"id": "tx-seed-2", "type": "expense", "categories": ["food"], "amount": 420.5,
   "note": "groceries", "source": "", "timestamp": "2025-03-03 17:30:00"},
  {"id": "tx-seed-3", "type": "expense", "categories": ["fuel", "car"], "amount": 180,
   "note": "", "source": "", "timestamp": "2025-03-05 08:10:00"},
  {"id": "tx-seed-4", "type": "expense", "categories": ["food"], "amount": 95.25,
   "note": "restaurant", "source": "", "timestamp": "2025-03-08 20:45:00"}
]"#;

/// Seed category data.
const SEED_CATEGORIES: &str = r#"["salary", "food", "fuel", "car", "shopping"]"#;

/// Seed bill data.
const SEED_BILLS: &str = r#"[
  {"id": "bill-seed-1", "name": "electricity", "amount": 230, "dueDate": "2025-03-10", "status": "unpaid"},
  {"id": "bill-seed-2", "name": "internet", "amount": 99, "dueDate": "2025-03-15", "status": "paid"}
]"#;

/// Seed goal data.
const SEED_GOALS: &str = r#"[
  {"id": "goal-seed-1", "goalName": "emergency fund", "goalTarget": 10000, "goalNote": "3 months of expenses"}
]"#;

/// Seed yearly item data.
const SEED_YEARLY: &str = r#"[
  {"id": "yearly-seed-1", "yearlyName": "car insurance", "yearlyAmount": 2400},
  {"id": "yearly-seed-2", "yearlyName": "license renewal", "yearlyAmount": 600}
]"#;

/// Seed shopping list data.
const SEED_SHOPPING: &str = r#"[
  {"id": "item-seed-1", "itemName": "school bag", "purchased": false}
]"#;
