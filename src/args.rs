//! These structs provide the CLI interface for the budget CLI.

use crate::model::Amount;
use crate::report::{ChartMode, ValueMode};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// budget: A command-line client for a household budget spreadsheet.
///
/// The spreadsheet is a Google Sheet fronted by a Google Apps Script web app. This program talks
/// to that web app: it records income and expenses, tracks bills, savings goals, yearly budget
/// items and a shopping list, and renders category charts and a 50/30/20 budget split from the
/// recorded data.
///
/// Run `budget init` first to point the program at your deployed web app URL.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. You need the URL of your deployed Google Apps
    /// Script web app (it looks like https://script.google.com/macros/s/XXXX/exec) and,
    /// optionally, a directory to keep the configuration in (--budget-home, default ~/budget).
    Init(InitArgs),
    /// Draw a pie chart of per-category totals.
    Chart(ChartArgs),
    /// List savings goals and yearly items, or add a goal.
    Goals(GoalsArgs),
    /// List yearly budget items, or add one.
    Yearly(YearlyArgs),
    /// Show the 50/30/20 split of a month's income.
    Split(SplitArgs),
    /// List, add, or delete transactions.
    Tx(TxArgs),
    /// List bills, add a bill, or change a bill's status.
    Bills(BillsArgs),
    /// Manage the shopping list.
    Shopping(ShoppingArgs),
    /// List or replace the category names.
    Categories(CategoriesArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where budget configuration is held. Defaults to ~/budget
    #[arg(long, env = "BUDGET_HOME", default_value_t = default_budget_home())]
    budget_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, budget_home: PathBuf) -> Self {
        Self {
            log_level,
            budget_home: budget_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn budget_home(&self) -> &DisplayPath {
        &self.budget_home
    }
}

#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The URL of your deployed Google Apps Script web app.
    #[arg(long)]
    gas_url: String,
}

impl InitArgs {
    pub fn new(gas_url: impl Into<String>) -> Self {
        Self {
            gas_url: gas_url.into(),
        }
    }

    pub fn gas_url(&self) -> &str {
        &self.gas_url
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Which transactions to chart: "all", "income" or "expense".
    #[arg(long, default_value_t = ChartMode::All, value_enum)]
    mode: ChartMode,

    /// How to show each slice: "percent" of the total or the raw "amount".
    #[arg(long, default_value_t = ValueMode::Percent, value_enum)]
    value_mode: ValueMode,
}

impl ChartArgs {
    pub fn new(mode: ChartMode, value_mode: ValueMode) -> Self {
        Self { mode, value_mode }
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn value_mode(&self) -> ValueMode {
        self.value_mode
    }
}

#[derive(Debug, Parser, Clone)]
pub struct GoalsArgs {
    #[command(subcommand)]
    action: GoalsSubcommand,
}

impl GoalsArgs {
    pub fn action(&self) -> &GoalsSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum GoalsSubcommand {
    /// Show all goals and yearly items, with the implied monthly cost.
    List,
    /// Save a new savings goal.
    Add(AddGoalArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddGoalArgs {
    /// The goal's name, e.g. "emergency fund".
    #[arg(long)]
    name: String,

    /// The target amount to save, which must be positive.
    #[arg(long)]
    target: Amount,

    /// An optional free-text note.
    #[arg(long, default_value = "")]
    note: String,
}

impl AddGoalArgs {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Amount {
        self.target
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

#[derive(Debug, Parser, Clone)]
pub struct YearlyArgs {
    #[command(subcommand)]
    action: YearlySubcommand,
}

impl YearlyArgs {
    pub fn action(&self) -> &YearlySubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum YearlySubcommand {
    /// Show the yearly items and the monthly cost they imply.
    List,
    /// Save a new yearly budget item.
    Add(AddYearlyArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddYearlyArgs {
    /// The item's name, e.g. "car insurance".
    #[arg(long)]
    name: String,

    /// The yearly cost, which must be positive.
    #[arg(long)]
    amount: Amount,
}

impl AddYearlyArgs {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

#[derive(Debug, Parser, Clone)]
pub struct SplitArgs {
    /// The month to split, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<String>,
}

impl SplitArgs {
    pub fn new(month: Option<String>) -> Self {
        Self { month }
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct TxArgs {
    #[command(subcommand)]
    action: TxSubcommand,
}

impl TxArgs {
    pub fn action(&self) -> &TxSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TxSubcommand {
    /// Show all transactions.
    List,
    /// Record an income or expense.
    Add(AddTxArgs),
    /// Delete a transaction by id.
    Delete(DeleteTxArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddTxArgs {
    /// "income" or "expense".
    #[arg(long = "type")]
    kind: String,

    /// The categories this transaction belongs to. Repeat the flag for more than one.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// The amount.
    #[arg(long)]
    amount: Amount,

    /// An optional free-text note.
    #[arg(long, default_value = "")]
    note: String,

    /// Where the money came from or went, e.g. a store or employer name.
    #[arg(long, default_value = "")]
    source: String,
}

impl AddTxArgs {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteTxArgs {
    /// The transaction id, as shown by `budget tx list`.
    #[arg(long)]
    id: String,
}

impl DeleteTxArgs {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Parser, Clone)]
pub struct BillsArgs {
    #[command(subcommand)]
    action: BillsSubcommand,
}

impl BillsArgs {
    pub fn action(&self) -> &BillsSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum BillsSubcommand {
    /// Show all bills.
    List,
    /// Add a bill.
    Add(AddBillArgs),
    /// Change a bill's status, e.g. mark it paid.
    Status(BillStatusArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddBillArgs {
    /// The bill's name, e.g. "electricity".
    #[arg(long)]
    name: String,

    /// The amount due.
    #[arg(long)]
    amount: Amount,

    /// The due date, as the sheet should show it, e.g. 2025-03-10.
    #[arg(long)]
    due: String,

    /// The initial status.
    #[arg(long, default_value = "unpaid")]
    status: String,
}

impl AddBillArgs {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn due(&self) -> &str {
        &self.due
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Parser, Clone)]
pub struct BillStatusArgs {
    /// The bill id, as shown by `budget bills list`.
    #[arg(long)]
    id: String,

    /// The new status, e.g. "paid".
    #[arg(long)]
    status: String,
}

impl BillStatusArgs {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ShoppingArgs {
    #[command(subcommand)]
    action: ShoppingSubcommand,
}

impl ShoppingArgs {
    pub fn action(&self) -> &ShoppingSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShoppingSubcommand {
    /// Show the pending shopping list.
    List,
    /// Add an item to the shopping list.
    Add(AddShoppingArgs),
    /// Mark an item purchased and record its price as an expense.
    Buy(BuyShoppingArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddShoppingArgs {
    /// The item's name.
    #[arg(long)]
    name: String,
}

impl AddShoppingArgs {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Parser, Clone)]
pub struct BuyShoppingArgs {
    /// The item id, as shown by `budget shopping list`.
    #[arg(long)]
    id: String,

    /// What the item cost.
    #[arg(long)]
    price: Amount,
}

impl BuyShoppingArgs {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn price(&self) -> Amount {
        self.price
    }
}

#[derive(Debug, Parser, Clone)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    action: CategoriesSubcommand,
}

impl CategoriesArgs {
    pub fn action(&self) -> &CategoriesSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoriesSubcommand {
    /// Show the category names.
    List,
    /// Replace the whole category list with the given names.
    Save(SaveCategoriesArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SaveCategoriesArgs {
    /// The complete new list of category names.
    #[arg(required = true)]
    names: Vec<String>,
}

impl SaveCategoriesArgs {
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

fn default_budget_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("budget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --budget-home or BUDGET_HOME instead of relying on the default \
                budget home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("budget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
