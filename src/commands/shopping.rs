use crate::api::WebApp;
use crate::commands::Out;
use crate::model::{Amount, ShoppingItem};
use crate::{Config, Mode, Result};

/// Shows the pending shopping list.
pub async fn shopping_list(config: Config, mode: Mode) -> Result<Out<Vec<ShoppingItem>>> {
    let mut app = WebApp::new(&config, mode);
    let items = app.fetch_shopping_list().await?;
    let message = if items.is_empty() {
        "The shopping list is empty".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("{}  {}", item.id, item.name))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Out::new(message, items))
}

/// Adds an item to the shopping list.
pub async fn add_shopping_item(config: Config, mode: Mode, name: &str) -> Result<Out<()>> {
    if name.trim().is_empty() {
        return Ok("Please enter an item name".into());
    }
    let mut app = WebApp::new(&config, mode);
    let id = app.add_shopping_item(name.trim()).await?;
    Ok(Out::new_message(format!(
        "Added '{}' to the shopping list ({id})",
        name.trim()
    )))
}

/// Marks an item purchased. The web app records the price as an expense under the "shopping"
/// category and drops the item from the pending list.
pub async fn buy_shopping_item(
    config: Config,
    mode: Mode,
    id: &str,
    price: Amount,
) -> Result<Out<()>> {
    if !price.is_positive() {
        return Ok("The price must be positive".into());
    }
    let mut app = WebApp::new(&config, mode);
    app.mark_shopping_purchased(id, price).await?;
    Ok(Out::new_message(format!(
        "Purchased {id} for {price} ILS and recorded the expense"
    )))
}
