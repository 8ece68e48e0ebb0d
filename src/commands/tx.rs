use crate::api::{NewTransaction, WebApp};
use crate::args::AddTxArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::{Config, Mode, Result};

/// Shows all recorded transactions, newest last, the way the sheet stores them.
pub async fn list_transactions(config: Config, mode: Mode) -> Result<Out<Vec<Transaction>>> {
    let mut app = WebApp::new(&config, mode);
    let transactions = app.fetch_transactions().await?;
    let message = if transactions.is_empty() {
        "No transactions recorded yet".to_string()
    } else {
        transactions
            .iter()
            .map(line)
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Out::new(message, transactions))
}

/// Records an income or expense.
pub async fn add_transaction(
    config: Config,
    mode: Mode,
    args: &AddTxArgs,
) -> Result<Out<Transaction>> {
    if args.kind() != "income" && args.kind() != "expense" {
        return Ok("The transaction type must be 'income' or 'expense'".into());
    }
    if !args.amount().is_positive() {
        return Ok("The amount must be positive".into());
    }

    let mut app = WebApp::new(&config, mode);
    let id = app
        .add_transaction(&NewTransaction {
            kind: args.kind().to_string(),
            categories: args.categories().to_vec(),
            amount: args.amount(),
            note: args.note().to_string(),
            source: args.source().to_string(),
        })
        .await?;
    Ok(Out::new_message(format!(
        "Recorded {} of {} ILS ({id})",
        args.kind(),
        args.amount()
    )))
}

/// Deletes a transaction by id.
pub async fn delete_transaction(config: Config, mode: Mode, id: &str) -> Result<Out<()>> {
    let mut app = WebApp::new(&config, mode);
    app.delete_transaction(id).await?;
    Ok(Out::new_message(format!("Deleted transaction {id}")))
}

fn line(tx: &Transaction) -> String {
    format!(
        "{}  {}  {}  {} ILS  [{}]",
        tx.id,
        tx.timestamp,
        tx.kind,
        tx.amount,
        tx.categories.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), "https://example.com/exec")
            .await
            .unwrap();
        (dir, config)
    }

    #[tokio::test]
    async fn test_list_transactions() {
        let (_dir, config) = config().await;
        let out = list_transactions(config, Mode::Test).await.unwrap();
        assert!(out.message().contains("tx-seed-1"));
        assert!(out.message().contains("6500.00 ILS"));
        assert_eq!(out.structure().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_add_transaction_validates_kind() {
        let (_dir, config) = config().await;
        let args = parse_add([
            "budget", "tx", "add", "--type", "transfer", "--amount", "10",
        ]);
        let out = add_transaction(config, Mode::Test, &args).await.unwrap();
        assert!(out.message().contains("must be 'income' or 'expense'"));
    }

    #[tokio::test]
    async fn test_add_transaction_validates_amount() {
        let (_dir, config) = config().await;
        let args = parse_add(["budget", "tx", "add", "--type", "expense", "--amount", "0"]);
        let out = add_transaction(config, Mode::Test, &args).await.unwrap();
        assert!(out.message().contains("must be positive"));
    }

    #[tokio::test]
    async fn test_add_transaction_records() {
        let (_dir, config) = config().await;
        let args = parse_add([
            "budget", "tx", "add", "--type", "expense", "--category", "food", "--amount",
            "75.50", "--note", "dinner",
        ]);
        let out = add_transaction(config, Mode::Test, &args).await.unwrap();
        assert!(out.message().contains("Recorded expense of 75.50 ILS"));
    }

    fn parse_add<const N: usize>(argv: [&str; N]) -> AddTxArgs {
        let args = <crate::args::Args as clap::Parser>::parse_from(argv);
        let crate::args::Command::Tx(tx) = args.command() else {
            panic!("expected tx");
        };
        let crate::args::TxSubcommand::Add(add) = tx.action() else {
            panic!("expected add");
        };
        add.clone()
    }
}
