//! The goals and yearly-budget view.
//!
//! Holds the two lists for the session. After every successful save the new record is prepended
//! optimistically for immediate feedback, then a full refetch reconciles the lists with the
//! sheet. The transient duplicate between those two steps is accepted, not deduplicated; the
//! refetch replaces the lists wholesale.

use crate::api::WebApp;
use crate::model::{Amount, Goal, YearlyItem};
use crate::report::{budget_split, monthly_cost, BudgetSplit};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User input for saving a goal.
#[derive(Debug, Clone, Default)]
pub struct GoalInput {
    pub name: String,
    pub target: Amount,
    pub note: String,
}

/// User input for saving a yearly item.
#[derive(Debug, Clone, Default)]
pub struct YearlyInput {
    pub name: String,
    pub amount: Amount,
}

/// The result of a save attempt. Both failure variants carry the alert to show the user; only
/// `Saved` changed the in-memory list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved and optimistically inserted. Call [`GoalsView::refresh`] to reconcile, then clear
    /// the input fields.
    Saved { id: String },
    /// Input failed validation; no remote call was made.
    Invalid(String),
    /// The remote call failed; the list is unchanged.
    Failed(String),
}

/// One row of a rendered list panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    pub title: String,
    pub lines: Vec<String>,
}

/// The render model for the whole view: two list panels and the derived monthly-cost line.
/// An empty panel means the host shows its "none yet" note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalsRender {
    pub goals: Vec<ListRow>,
    pub yearly: Vec<ListRow>,
    pub monthly_cost: String,
}

/// Controller for the goals/yearly view.
pub struct GoalsView {
    api: WebApp,
    goals: Vec<Goal>,
    yearly: Vec<YearlyItem>,
}

impl GoalsView {
    pub fn new(api: WebApp) -> Self {
        Self {
            api,
            goals: Vec::new(),
            yearly: Vec::new(),
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn yearly(&self) -> &[YearlyItem] {
        &self.yearly
    }

    /// Replaces both lists with the sheet's authoritative state. A failed fetch degrades to
    /// empty lists; the lists are a view of remote state, never a cache to preserve.
    pub async fn refresh(&mut self) {
        match self.api.fetch_goals_and_yearly().await {
            Ok((goals, yearly)) => {
                self.goals = goals;
                self.yearly = yearly;
            }
            Err(e) => {
                debug!("goals fetch failed ({}), rendering empty", e.code());
                self.goals.clear();
                self.yearly.clear();
            }
        }
    }

    /// Saves a goal. Validation failures never reach the network. On success the normalized goal
    /// is prepended so the user sees it immediately; the caller should render, then `refresh` to
    /// reconcile with the sheet.
    pub async fn save_goal(&mut self, input: &GoalInput) -> SaveOutcome {
        let name = input.name.trim();
        if name.is_empty() || !input.target.is_positive() {
            return SaveOutcome::Invalid(
                "Please enter a goal name and a positive target".to_string(),
            );
        }

        match self.api.add_goal(name, input.target, input.note.trim()).await {
            Err(e) => SaveOutcome::Failed(format!("Saving the goal failed ({})", e.code())),
            Ok(id) => {
                self.goals.insert(
                    0,
                    Goal {
                        id: id.clone(),
                        name: name.to_string(),
                        target: input.target,
                        note: input.note.trim().to_string(),
                    },
                );
                SaveOutcome::Saved { id }
            }
        }
    }

    /// Saves a yearly item, with the same lifecycle as [`GoalsView::save_goal`].
    pub async fn save_yearly(&mut self, input: &YearlyInput) -> SaveOutcome {
        let name = input.name.trim();
        if name.is_empty() || !input.amount.is_positive() {
            return SaveOutcome::Invalid(
                "Please enter a yearly item name and a positive amount".to_string(),
            );
        }

        match self.api.add_yearly_item(name, input.amount).await {
            Err(e) => SaveOutcome::Failed(format!("Saving the yearly item failed ({})", e.code())),
            Ok(id) => {
                self.yearly.insert(
                    0,
                    YearlyItem {
                        id: id.clone(),
                        name: name.to_string(),
                        amount: input.amount,
                    },
                );
                SaveOutcome::Saved { id }
            }
        }
    }

    /// The 50/30/20 split of the income recorded for the given calendar month. A failed fetch
    /// counts as no income, it does not error.
    pub async fn budget_split(&mut self, year: i32, month: u32) -> BudgetSplit {
        let transactions = match self.api.fetch_transactions().await {
            Ok(transactions) => transactions,
            Err(e) => {
                debug!("split fetch failed ({}), treating as no income", e.code());
                Vec::new()
            }
        };
        budget_split(&transactions, year, month)
    }

    /// Pure render of the current state.
    pub fn render(&self) -> GoalsRender {
        let goals = self
            .goals
            .iter()
            .map(|goal| {
                let title = if goal.name.is_empty() {
                    "(unnamed goal)".to_string()
                } else {
                    goal.name.clone()
                };
                let mut lines = vec![format!("target: {} ILS", goal.target)];
                if !goal.note.is_empty() {
                    lines.push(format!("note: {}", goal.note));
                }
                ListRow { title, lines }
            })
            .collect();

        let yearly = self
            .yearly
            .iter()
            .map(|item| {
                let title = if item.name.is_empty() {
                    "(yearly item)".to_string()
                } else {
                    item.name.clone()
                };
                ListRow {
                    title,
                    lines: vec![format!("yearly amount: {} ILS", item.amount)],
                }
            })
            .collect();

        GoalsRender {
            goals,
            yearly,
            monthly_cost: format!("monthly cost {} ILS", monthly_cost(&self.yearly)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TestGas, Transport, WebApp};
    use crate::ApiError;
    use serde_json::{json, Value};
    use std::str::FromStr;

    struct Canned(Value);

    #[async_trait::async_trait]
    impl Transport for Canned {
        async fn call(&mut self, _: &str, _: &[(&str, String)]) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn seeded_view() -> GoalsView {
        GoalsView::new(WebApp::with_transport(Box::new(TestGas::default())))
    }

    fn goal_input(name: &str, target: &str) -> GoalInput {
        GoalInput {
            name: name.to_string(),
            target: Amount::from_str(target).unwrap(),
            note: String::new(),
        }
    }

    #[tokio::test]
    async fn test_refresh_loads_both_lists() {
        let mut view = seeded_view();
        view.refresh().await;
        assert_eq!(view.goals().len(), 1);
        assert_eq!(view.yearly().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_renders_empty() {
        let mut view = GoalsView::new(WebApp::with_transport(Box::new(Canned(
            json!({ "ok": false, "error": "SHEET_LOCKED" }),
        ))));
        view.refresh().await;
        assert!(view.goals().is_empty());
        let render = view.render();
        assert!(render.goals.is_empty());
        assert!(render.yearly.is_empty());
    }

    #[tokio::test]
    async fn test_save_goal_validation_blocks_remote_call() {
        let mut view = seeded_view();
        view.refresh().await;
        let before = view.goals().to_vec();

        let outcome = view.save_goal(&goal_input("   ", "100")).await;
        assert!(matches!(outcome, SaveOutcome::Invalid(_)));

        let outcome = view.save_goal(&goal_input("car", "0")).await;
        assert!(matches!(outcome, SaveOutcome::Invalid(_)));

        let outcome = view.save_goal(&goal_input("car", "-5")).await;
        assert!(matches!(outcome, SaveOutcome::Invalid(_)));

        assert_eq!(view.goals(), before.as_slice());
    }

    // Scenario D: a remote failure leaves the list unchanged and carries an alert.
    #[tokio::test]
    async fn test_save_goal_remote_failure() {
        let mut view = GoalsView::new(WebApp::with_transport(Box::new(Canned(
            json!({ "ok": false, "error": "SHEET_LOCKED" }),
        ))));
        let outcome = view.save_goal(&goal_input("car", "25000")).await;
        match outcome {
            SaveOutcome::Failed(alert) => assert!(alert.contains("SHEET_LOCKED")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(view.goals().is_empty());
    }

    // Scenario E: optimistic front insert, then reconciliation by refetch.
    #[tokio::test]
    async fn test_save_goal_optimistic_then_reconciled() {
        let mut view = seeded_view();
        view.refresh().await;

        let outcome = view
            .save_goal(&GoalInput {
                name: "  new car  ".to_string(),
                target: Amount::from_str("25000").unwrap(),
                note: " note ".to_string(),
            })
            .await;
        let SaveOutcome::Saved { id } = outcome else {
            panic!("expected Saved, got {outcome:?}");
        };

        // Optimistic state: the new goal sits at the front, normalized (trimmed).
        assert_eq!(view.goals()[0].id, id);
        assert_eq!(view.goals()[0].name, "new car");
        assert_eq!(view.goals()[0].note, "note");
        assert_eq!(view.goals().len(), 2);

        // Reconcile: the refetched list contains the saved goal exactly once.
        view.refresh().await;
        let matching: Vec<_> = view.goals().iter().filter(|g| g.id == id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(view.goals().len(), 2);
    }

    #[tokio::test]
    async fn test_save_yearly_lifecycle() {
        let mut view = seeded_view();
        view.refresh().await;

        let outcome = view
            .save_yearly(&YearlyInput {
                name: "passport renewal".to_string(),
                amount: Amount::from_str("360").unwrap(),
            })
            .await;
        assert!(matches!(outcome, SaveOutcome::Saved { .. }));
        assert_eq!(view.yearly()[0].name, "passport renewal");

        let outcome = view
            .save_yearly(&YearlyInput {
                name: String::new(),
                amount: Amount::from_str("10").unwrap(),
            })
            .await;
        assert!(matches!(outcome, SaveOutcome::Invalid(_)));
    }

    #[tokio::test]
    async fn test_render_rows_and_monthly_cost() {
        let mut view = seeded_view();
        view.refresh().await;
        let render = view.render();

        assert_eq!(render.goals[0].title, "emergency fund");
        assert_eq!(render.goals[0].lines[0], "target: 10000.00 ILS");
        assert_eq!(render.goals[0].lines[1], "note: 3 months of expenses");

        // Seeded yearly items total 3000 -> 250 per month.
        assert_eq!(render.monthly_cost, "monthly cost 250.00 ILS");
        assert_eq!(render.yearly.len(), 2);
        assert_eq!(render.yearly[0].lines[0], "yearly amount: 2400.00 ILS");
    }

    #[tokio::test]
    async fn test_render_unnamed_goal_placeholder_title() {
        let mut view = GoalsView::new(WebApp::with_transport(Box::new(Canned(json!({
            "ok": true,
            "goals": [{"id": "g1", "goalTarget": 50}],
            "yearlyItems": [],
        })))));
        view.refresh().await;
        let render = view.render();
        assert_eq!(render.goals[0].title, "(unnamed goal)");
    }

    #[tokio::test]
    async fn test_budget_split_through_view() {
        let mut view = GoalsView::new(WebApp::with_transport(Box::new(Canned(json!({
            "ok": true,
            "transactions": [
                {"id": "1", "type": "income", "categories": [], "amount": 1000,
                 "timestamp": "2025-03-01 09:00:00"},
            ],
            "goals": [],
            "yearlyItems": [],
        })))));
        let split = view.budget_split(2025, 3).await;
        assert_eq!(split.income, Amount::from_str("1000").unwrap());
        assert_eq!(split.needs, Amount::from_str("500").unwrap());
        assert_eq!(split.wants, Amount::from_str("300").unwrap());
        assert_eq!(split.savings, Amount::from_str("200").unwrap());
    }

    #[tokio::test]
    async fn test_budget_split_fetch_failure_is_zero() {
        let mut view = GoalsView::new(WebApp::with_transport(Box::new(Canned(
            json!({ "ok": false, "error": "SHEET_LOCKED" }),
        ))));
        let split = view.budget_split(2025, 3).await;
        assert!(split.income.is_zero());
    }
}
