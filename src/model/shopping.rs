//! The shared shopping list.

use crate::model::{coerce_string, coerce_trimmed, Amount};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An item on the shopping list. When marked purchased, the web app records the price, moves it
/// into expenses, and drops it from the pending list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub price: Amount,
    pub purchased: bool,
}

impl ShoppingItem {
    /// Normalizes a raw `items[]` row.
    pub fn from_value(row: &Value) -> Self {
        let purchased = match row.get("purchased") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        };
        Self {
            id: coerce_string(row.get("id")),
            name: coerce_trimmed(row.get("itemName")),
            price: Amount::coerce(row.get("price")),
            purchased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shopping_item_from_value() {
        let item = ShoppingItem::from_value(&json!({
            "id": "s1",
            "itemName": "diapers",
            "price": 45.9,
            "purchased": true,
        }));
        assert_eq!(item.id, "s1");
        assert_eq!(item.name, "diapers");
        assert_eq!(item.price.to_string(), "45.90");
        assert!(item.purchased);
    }

    #[test]
    fn test_purchased_coercion() {
        assert!(ShoppingItem::from_value(&json!({"purchased": "true"})).purchased);
        assert!(ShoppingItem::from_value(&json!({"purchased": 1})).purchased);
        assert!(!ShoppingItem::from_value(&json!({"purchased": 0})).purchased);
        assert!(!ShoppingItem::from_value(&json!({})).purchased);
    }
}
