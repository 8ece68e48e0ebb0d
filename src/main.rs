use clap::Parser;
use gas_budget::args::{
    Args, BillsSubcommand, CategoriesSubcommand, Command, GoalsSubcommand, ShoppingSubcommand,
    TxSubcommand, YearlySubcommand,
};
use gas_budget::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().budget_home().path();

    // This allows for testing the program without a deployed web app. When BUDGET_IN_TEST_MODE
    // is set and non-zero in length, then the mode will be Mode::Test, otherwise it will be
    // Mode::Gas.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.gas_url()).await?.print(),

        Command::Chart(chart_args) => {
            let config = Config::load(home).await?;
            commands::chart(config, mode, chart_args.mode(), chart_args.value_mode())
                .await?
                .print()
        }

        Command::Goals(goals_args) => {
            let config = Config::load(home).await?;
            match goals_args.action() {
                GoalsSubcommand::List => commands::goals_list(config, mode).await?.print(),
                GoalsSubcommand::Add(add_args) => {
                    commands::add_goal(config, mode, add_args).await?.print()
                }
            }
        }

        Command::Yearly(yearly_args) => {
            let config = Config::load(home).await?;
            match yearly_args.action() {
                YearlySubcommand::List => commands::yearly_list(config, mode).await?.print(),
                YearlySubcommand::Add(add_args) => {
                    commands::add_yearly(config, mode, add_args).await?.print()
                }
            }
        }

        Command::Split(split_args) => {
            let config = Config::load(home).await?;
            commands::split(config, mode, split_args.month()).await?.print()
        }

        Command::Tx(tx_args) => {
            let config = Config::load(home).await?;
            match tx_args.action() {
                TxSubcommand::List => commands::list_transactions(config, mode).await?.print(),
                TxSubcommand::Add(add_args) => {
                    commands::add_transaction(config, mode, add_args).await?.print()
                }
                TxSubcommand::Delete(delete_args) => {
                    commands::delete_transaction(config, mode, delete_args.id())
                        .await?
                        .print()
                }
            }
        }

        Command::Bills(bills_args) => {
            let config = Config::load(home).await?;
            match bills_args.action() {
                BillsSubcommand::List => commands::list_bills(config, mode).await?.print(),
                BillsSubcommand::Add(add_args) => {
                    commands::add_bill(config, mode, add_args).await?.print()
                }
                BillsSubcommand::Status(status_args) => {
                    commands::bill_status(config, mode, status_args.id(), status_args.status())
                        .await?
                        .print()
                }
            }
        }

        Command::Shopping(shopping_args) => {
            let config = Config::load(home).await?;
            match shopping_args.action() {
                ShoppingSubcommand::List => commands::shopping_list(config, mode).await?.print(),
                ShoppingSubcommand::Add(add_args) => {
                    commands::add_shopping_item(config, mode, add_args.name())
                        .await?
                        .print()
                }
                ShoppingSubcommand::Buy(buy_args) => {
                    commands::buy_shopping_item(config, mode, buy_args.id(), buy_args.price())
                        .await?
                        .print()
                }
            }
        }

        Command::Categories(categories_args) => {
            let config = Config::load(home).await?;
            match categories_args.action() {
                CategoriesSubcommand::List => {
                    commands::list_categories(config, mode).await?.print()
                }
                CategoriesSubcommand::Save(save_args) => {
                    commands::save_categories(config, mode, save_args.names())
                        .await?
                        .print()
                }
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use the default log level for this program only.
            EnvFilter::new(format!("gas_budget={level},{}={level}", env!("CARGO_CRATE_NAME")))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
