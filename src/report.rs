//! Pure aggregation over normalized records: per-category totals for the pie chart, display
//! decoration, the 50/30/20 budget split, and the yearly-items monthly cost.
//!
//! Nothing in here touches the network or any mutable state, so every derived number the views
//! show is testable in isolation.

use crate::model::{Amount, Transaction, TransactionKind, YearlyItem};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which transactions feed the category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Income and expenses together.
    #[default]
    All,
    /// Only transactions of type "income".
    Income,
    /// Only transactions of type "expense".
    Expense,
}

serde_plain::derive_display_from_serialize!(ChartMode);
serde_plain::derive_fromstr_from_deserialize!(ChartMode);

/// Whether aggregated totals are shown as percentages of the total or as raw currency amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    /// Each category as a percentage of the filtered total.
    #[default]
    Percent,
    /// Raw currency amounts.
    Amount,
}

serde_plain::derive_display_from_serialize!(ValueMode);
serde_plain::derive_fromstr_from_deserialize!(ValueMode);

/// Per-category totals in first-seen order. The two vectors are always the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub labels: Vec<String>,
    pub amounts: Vec<Amount>,
}

impl CategoryTotals {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Labels decorated for display, paired with the final values to plot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayValues {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

/// The fixed-ratio 50/30/20 allocation of one month's income.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetSplit {
    /// Total income for the reference month.
    pub income: Amount,
    /// 50% - essentials.
    pub needs: Amount,
    /// 30% - wants.
    pub wants: Amount,
    /// 20% - savings.
    pub savings: Amount,
}

/// Sums transaction amounts per category.
///
/// Transactions are filtered by `mode` (the income and expense filters are exact, so a
/// transaction with an unrecognized type only appears under `All`), and zero-amount transactions
/// are skipped. A transaction with N categories contributes its FULL amount to each of the N
/// categories; the amount is not divided. That is how the spreadsheet has always reported and
/// the chart depends on it.
///
/// Labels come out in first-seen order. Empty or fully-filtered input yields two empty vectors.
pub fn category_totals(transactions: &[Transaction], mode: ChartMode) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for tx in transactions {
        match mode {
            ChartMode::All => {}
            ChartMode::Income if tx.kind != TransactionKind::Income => continue,
            ChartMode::Expense if tx.kind != TransactionKind::Expense => continue,
            _ => {}
        }
        if tx.amount.is_zero() {
            continue;
        }
        for category in &tx.categories {
            match totals.labels.iter().position(|label| label == category) {
                Some(ix) => totals.amounts[ix] += tx.amount,
                None => {
                    totals.labels.push(category.clone());
                    totals.amounts.push(tx.amount);
                }
            }
        }
    }

    totals
}

/// Converts totals into what the chart actually shows.
///
/// In percent mode each amount becomes its share of the total, times one hundred, and the label
/// gains a one-decimal percentage suffix. When the total is not positive the amounts pass through
/// unconverted so that no division by zero (and no NaN) can occur. In amount mode the values pass
/// through and the label gains a two-decimal currency suffix.
pub fn display_values(totals: &CategoryTotals, value_mode: ValueMode) -> DisplayValues {
    match value_mode {
        ValueMode::Percent => {
            let total: Decimal = totals.amounts.iter().map(|a| a.value()).sum();
            let values: Vec<Decimal> = if total > Decimal::ZERO {
                totals
                    .amounts
                    .iter()
                    .map(|a| a.value() / total * Decimal::ONE_HUNDRED)
                    .collect()
            } else {
                totals.amounts.iter().map(|a| a.value()).collect()
            };
            let labels = totals
                .labels
                .iter()
                .zip(&values)
                .map(|(label, value)| format!("{label} ({value:.1}%)"))
                .collect();
            DisplayValues { labels, values }
        }
        ValueMode::Amount => DisplayValues {
            labels: totals
                .labels
                .iter()
                .zip(&totals.amounts)
                .map(|(label, amount)| format!("{label} ({amount} ILS)"))
                .collect(),
            values: totals.amounts.iter().map(|a| a.value()).collect(),
        },
    }
}

/// Computes the 50/30/20 split of the income received in the given calendar month.
///
/// Only transactions of type "income" whose timestamp parses and falls within `year`/`month`
/// are counted; a missing or unparsable timestamp excludes the transaction, it is not an error.
pub fn budget_split(transactions: &[Transaction], year: i32, month: u32) -> BudgetSplit {
    let income: Decimal = transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Income)
        .filter_map(|tx| tx.parsed_timestamp().map(|ts| (tx, ts)))
        .filter(|(_, ts)| ts.year() == year && ts.month() == month)
        .map(|(tx, _)| tx.amount.value())
        .sum();

    BudgetSplit {
        income: Amount::new(income),
        needs: Amount::new(income * Decimal::new(5, 1)),
        wants: Amount::new(income * Decimal::new(3, 1)),
        savings: Amount::new(income * Decimal::new(2, 1)),
    }
}

/// The monthly cost implied by the yearly budget items: their sum divided by twelve.
pub fn monthly_cost(items: &[YearlyItem]) -> Amount {
    let sum: Decimal = items.iter().map(|item| item.amount.value()).sum();
    Amount::new(sum / Decimal::from(12))
}
