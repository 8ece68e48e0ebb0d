use crate::api::{NewBill, WebApp};
use crate::args::AddBillArgs;
use crate::commands::Out;
use crate::model::Bill;
use crate::{Config, Mode, Result};

/// Shows all bills with their due dates and statuses.
pub async fn list_bills(config: Config, mode: Mode) -> Result<Out<Vec<Bill>>> {
    let mut app = WebApp::new(&config, mode);
    let bills = app.fetch_bills().await?;
    let message = if bills.is_empty() {
        "No bills recorded yet".to_string()
    } else {
        bills
            .iter()
            .map(|bill| {
                format!(
                    "{}  {}  {} ILS  due {}  [{}]",
                    bill.id, bill.name, bill.amount, bill.due_date, bill.status
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Out::new(message, bills))
}

/// Adds a bill.
pub async fn add_bill(config: Config, mode: Mode, args: &AddBillArgs) -> Result<Out<()>> {
    if args.name().trim().is_empty() {
        return Ok("Please enter a bill name".into());
    }
    if !args.amount().is_positive() {
        return Ok("The amount must be positive".into());
    }

    let mut app = WebApp::new(&config, mode);
    let id = app
        .add_bill(&NewBill {
            name: args.name().trim().to_string(),
            amount: args.amount(),
            due_date: args.due().to_string(),
            status: args.status().to_string(),
        })
        .await?;
    Ok(Out::new_message(format!(
        "Added bill '{}' ({id})",
        args.name().trim()
    )))
}

/// Changes a bill's status.
pub async fn bill_status(config: Config, mode: Mode, id: &str, status: &str) -> Result<Out<()>> {
    let mut app = WebApp::new(&config, mode);
    app.update_bill_status(id, status).await?;
    Ok(Out::new_message(format!("Bill {id} is now '{status}'")))
}
