//! Typed wrappers over the web app's actions.
//!
//! Each wrapper names the parameters its action requires and forwards them unchanged; none of
//! them validate anything. List-valued parameters are JSON-encoded here because the query string
//! only carries flat strings.

use crate::api::{GasClient, TestGas, Transport};
use crate::model::{coerce_string, Amount, Bill, Goal, ShoppingItem, Transaction, YearlyItem};
use crate::{ApiError, Config, Mode};
use serde_json::{Map, Value};

/// Input for `addTransaction`. Ids and timestamps are assigned server-side.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    /// "income" or "expense"; forwarded as-is, the server does not validate it either.
    pub kind: String,
    pub categories: Vec<String>,
    pub amount: Amount,
    pub note: String,
    pub source: String,
}

/// Input for `addBill`.
#[derive(Debug, Clone, Default)]
pub struct NewBill {
    pub name: String,
    pub amount: Amount,
    pub due_date: String,
    pub status: String,
}

/// The high-level client for the budget web app: one method per remote action.
pub struct WebApp {
    transport: Box<dyn Transport + Send>,
}

impl WebApp {
    /// Creates a client backed by HTTP or by the in-memory test transport, depending on `mode`.
    pub fn new(config: &Config, mode: Mode) -> Self {
        match mode {
            Mode::Gas => Self::with_transport(Box::new(GasClient::new(config.gas_base_url()))),
            Mode::Test => Self::with_transport(Box::new(TestGas::default())),
        }
    }

    pub fn with_transport(transport: Box<dyn Transport + Send>) -> Self {
        Self { transport }
    }

    /// Issues a call and unwraps the `{ok, ...}` envelope. An `ok: false` answer becomes
    /// `ApiError::Remote` with the server's error code; a missing or non-boolean `ok` flag is a
    /// malformed response.
    async fn call_ok(
        &mut self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Map<String, Value>, ApiError> {
        let response = self.transport.call(action, params).await?;
        let Value::Object(fields) = response else {
            return Err(ApiError::MalformedResponse(format!(
                "expected a JSON object from '{action}'"
            )));
        };
        match fields.get("ok") {
            Some(Value::Bool(true)) => Ok(fields),
            Some(Value::Bool(false)) => {
                let code = match fields.get("error") {
                    Some(Value::String(code)) if !code.is_empty() => code.clone(),
                    _ => "UNKNOWN".to_string(),
                };
                Err(ApiError::Remote(code))
            }
            _ => Err(ApiError::MalformedResponse(format!(
                "missing 'ok' flag in response from '{action}'"
            ))),
        }
    }

    pub async fn fetch_transactions(&mut self) -> Result<Vec<Transaction>, ApiError> {
        let fields = self.call_ok("getTransactions", &[]).await?;
        Ok(array_field(&fields, "transactions")?
            .iter()
            .map(Transaction::from_value)
            .collect())
    }

    pub async fn add_transaction(&mut self, tx: &NewTransaction) -> Result<String, ApiError> {
        let fields = self
            .call_ok(
                "addTransaction",
                &[
                    ("type", tx.kind.clone()),
                    ("categories", encode_list(&tx.categories)),
                    ("amount", tx.amount.to_string()),
                    ("note", tx.note.clone()),
                    ("source", tx.source.clone()),
                ],
            )
            .await?;
        Ok(coerce_string(fields.get("id")))
    }

    pub async fn delete_transaction(&mut self, id: &str) -> Result<(), ApiError> {
        self.call_ok("deleteTransaction", &[("id", id.to_string())])
            .await?;
        Ok(())
    }

    pub async fn fetch_categories(&mut self) -> Result<Vec<String>, ApiError> {
        let fields = self.call_ok("getCategories", &[]).await?;
        Ok(array_field(&fields, "categories")?
            .iter()
            .map(|item| coerce_string(Some(item)))
            .collect())
    }

    pub async fn save_categories(&mut self, categories: &[String]) -> Result<(), ApiError> {
        self.call_ok("saveCategories", &[("categories", encode_list(categories))])
            .await?;
        Ok(())
    }

    pub async fn fetch_bills(&mut self) -> Result<Vec<Bill>, ApiError> {
        let fields = self.call_ok("getBills", &[]).await?;
        Ok(array_field(&fields, "bills")?
            .iter()
            .map(Bill::from_value)
            .collect())
    }

    pub async fn add_bill(&mut self, bill: &NewBill) -> Result<String, ApiError> {
        let fields = self
            .call_ok(
                "addBill",
                &[
                    ("name", bill.name.clone()),
                    ("amount", bill.amount.to_string()),
                    ("dueDate", bill.due_date.clone()),
                    ("status", bill.status.clone()),
                ],
            )
            .await?;
        Ok(coerce_string(fields.get("id")))
    }

    pub async fn update_bill_status(
        &mut self,
        bill_id: &str,
        status: &str,
    ) -> Result<(), ApiError> {
        self.call_ok(
            "updateBillStatus",
            &[
                ("billId", bill_id.to_string()),
                ("status", status.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Fetches goals and yearly items together, the way the sheet stores them. Either list may
    /// be missing from the payload (older deployments used a `yearly` key); a missing list
    /// normalizes to empty rather than failing the whole fetch.
    pub async fn fetch_goals_and_yearly(
        &mut self,
    ) -> Result<(Vec<Goal>, Vec<YearlyItem>), ApiError> {
        let fields = self.call_ok("getGoalsAndYearly", &[]).await?;
        let goals = optional_array(&fields, "goals")
            .iter()
            .map(Goal::from_value)
            .collect();
        let yearly_raw = match fields.get("yearlyItems") {
            Some(Value::Array(_)) => optional_array(&fields, "yearlyItems"),
            _ => optional_array(&fields, "yearly"),
        };
        let yearly = yearly_raw.iter().map(YearlyItem::from_value).collect();
        Ok((goals, yearly))
    }

    pub async fn add_goal(
        &mut self,
        name: &str,
        target: Amount,
        note: &str,
    ) -> Result<String, ApiError> {
        let fields = self
            .call_ok(
                "addGoal",
                &[
                    ("goalName", name.to_string()),
                    ("goalTarget", target.to_string()),
                    ("goalNote", note.to_string()),
                ],
            )
            .await?;
        Ok(coerce_string(fields.get("id")))
    }

    pub async fn add_yearly_item(
        &mut self,
        name: &str,
        amount: Amount,
    ) -> Result<String, ApiError> {
        let fields = self
            .call_ok(
                "addYearlyItem",
                &[
                    ("yearlyName", name.to_string()),
                    ("yearlyAmount", amount.to_string()),
                ],
            )
            .await?;
        Ok(coerce_string(fields.get("id")))
    }

    pub async fn fetch_shopping_list(&mut self) -> Result<Vec<ShoppingItem>, ApiError> {
        let fields = self.call_ok("getShoppingList", &[]).await?;
        Ok(array_field(&fields, "items")?
            .iter()
            .map(ShoppingItem::from_value)
            .collect())
    }

    pub async fn add_shopping_item(&mut self, name: &str) -> Result<String, ApiError> {
        let fields = self
            .call_ok("addShoppingItem", &[("itemName", name.to_string())])
            .await?;
        Ok(coerce_string(fields.get("id")))
    }

    pub async fn mark_shopping_purchased(
        &mut self,
        item_id: &str,
        price: Amount,
    ) -> Result<(), ApiError> {
        self.call_ok(
            "markShoppingPurchased",
            &[
                ("itemId", item_id.to_string()),
                ("price", price.to_string()),
            ],
        )
        .await?;
        Ok(())
    }
}

/// A required array field; anything else is a malformed response.
fn array_field<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Vec<Value>, ApiError> {
    match fields.get(key) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ApiError::MalformedResponse(format!(
            "expected '{key}' to be an array"
        ))),
    }
}

/// An optional array field; anything else is treated as empty.
fn optional_array(fields: &Map<String, Value>, key: &str) -> Vec<Value> {
    match fields.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// JSON-encodes a list parameter for the query string.
fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    /// A transport that always answers with the same canned value.
    struct Canned(Value);

    #[async_trait::async_trait]
    impl Transport for Canned {
        async fn call(&mut self, _: &str, _: &[(&str, String)]) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn seeded() -> WebApp {
        WebApp::with_transport(Box::new(TestGas::default()))
    }

    #[tokio::test]
    async fn test_fetch_transactions() {
        let mut app = seeded();
        let transactions = app.fetch_transactions().await.unwrap();
        assert!(!transactions.is_empty());
        assert!(transactions.iter().all(|tx| !tx.id.is_empty()));
    }

    #[tokio::test]
    async fn test_add_transaction_returns_id_and_roundtrips() {
        let mut app = WebApp::with_transport(Box::new(TestGas::empty()));
        let id = app
            .add_transaction(&NewTransaction {
                kind: "expense".to_string(),
                categories: vec!["food".to_string(), "family".to_string()],
                amount: Amount::from_str("75.50").unwrap(),
                note: "dinner".to_string(),
                source: String::new(),
            })
            .await
            .unwrap();
        assert!(!id.is_empty());

        let transactions = app.fetch_transactions().await.unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, id);
        assert_eq!(transactions[0].categories, vec!["food", "family"]);
        assert_eq!(transactions[0].amount.to_string(), "75.50");
    }

    #[tokio::test]
    async fn test_goals_and_yearly() {
        let mut app = seeded();
        let (goals, yearly) = app.fetch_goals_and_yearly().await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].name, "emergency fund");
        assert_eq!(yearly.len(), 2);
    }

    #[tokio::test]
    async fn test_goals_legacy_yearly_key() {
        let mut app = WebApp::with_transport(Box::new(Canned(json!({
            "ok": true,
            "goals": [],
            "yearly": [{"id": "y1", "yearlyName": "tax", "yearlyAmount": 300}],
        }))));
        let (goals, yearly) = app.fetch_goals_and_yearly().await.unwrap();
        assert!(goals.is_empty());
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly[0].name, "tax");
    }

    #[tokio::test]
    async fn test_remote_failure_is_tagged() {
        let mut app = WebApp::with_transport(Box::new(Canned(json!({
            "ok": false,
            "error": "SHEET_LOCKED",
        }))));
        let result = app.fetch_transactions().await;
        assert_eq!(result.unwrap_err(), ApiError::Remote("SHEET_LOCKED".into()));
    }

    #[tokio::test]
    async fn test_remote_failure_without_code() {
        let mut app = WebApp::with_transport(Box::new(Canned(json!({ "ok": false }))));
        let result = app.fetch_bills().await;
        assert_eq!(result.unwrap_err(), ApiError::Remote("UNKNOWN".into()));
    }

    #[tokio::test]
    async fn test_missing_ok_flag_is_malformed() {
        let mut app =
            WebApp::with_transport(Box::new(Canned(json!({ "transactions": [] }))));
        let result = app.fetch_transactions().await;
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_non_object_response_is_malformed() {
        let mut app = WebApp::with_transport(Box::new(Canned(json!([1, 2, 3]))));
        let result = app.fetch_categories().await;
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_non_array_payload_is_malformed() {
        let mut app = WebApp::with_transport(Box::new(Canned(json!({
            "ok": true,
            "transactions": "oops",
        }))));
        let result = app.fetch_transactions().await;
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_bill_lifecycle() {
        let mut app = seeded();
        let id = app
            .add_bill(&NewBill {
                name: "water".to_string(),
                amount: Amount::from_str("80").unwrap(),
                due_date: "2025-03-20".to_string(),
                status: "unpaid".to_string(),
            })
            .await
            .unwrap();
        app.update_bill_status(&id, "paid").await.unwrap();
        let bills = app.fetch_bills().await.unwrap();
        let bill = bills.iter().find(|b| b.id == id).unwrap();
        assert_eq!(bill.status, "paid");
    }

    #[tokio::test]
    async fn test_shopping_lifecycle() {
        let mut app = seeded();
        let id = app.add_shopping_item("batteries").await.unwrap();
        app.mark_shopping_purchased(&id, Amount::from_str("25").unwrap())
            .await
            .unwrap();
        let items = app.fetch_shopping_list().await.unwrap();
        assert!(items.iter().all(|item| item.id != id));
    }

    #[tokio::test]
    async fn test_save_and_fetch_categories() {
        let mut app = seeded();
        let list = vec!["rent".to_string(), "food".to_string()];
        app.save_categories(&list).await.unwrap();
        assert_eq!(app.fetch_categories().await.unwrap(), list);
    }
}
