use crate::api::WebApp;
use crate::args::{AddGoalArgs, AddYearlyArgs};
use crate::commands::Out;
use crate::report::BudgetSplit;
use crate::view::{GoalInput, GoalsRender, GoalsView, SaveOutcome, YearlyInput};
use crate::{Config, Mode, Result};
use anyhow::Context;
use chrono::Datelike;

/// Shows all goals and yearly items along with the implied monthly cost.
pub async fn goals_list(config: Config, mode: Mode) -> Result<Out<GoalsRender>> {
    let mut view = GoalsView::new(WebApp::new(&config, mode));
    view.refresh().await;
    let render = view.render();
    Ok(Out::new(render_message(&render), render))
}

/// Saves a new savings goal and shows the refreshed list. Validation and remote failures are
/// reported as messages, the way the sheet's own front end alerts, rather than as errors.
pub async fn add_goal(config: Config, mode: Mode, args: &AddGoalArgs) -> Result<Out<GoalsRender>> {
    let mut view = GoalsView::new(WebApp::new(&config, mode));
    view.refresh().await;
    let input = GoalInput {
        name: args.name().to_string(),
        target: args.target(),
        note: args.note().to_string(),
    };
    match view.save_goal(&input).await {
        SaveOutcome::Saved { id } => {
            view.refresh().await;
            let render = view.render();
            let message = format!("Saved goal '{}' ({id})\n{}", input.name.trim(), render_message(&render));
            Ok(Out::new(message, render))
        }
        SaveOutcome::Invalid(alert) | SaveOutcome::Failed(alert) => Ok(alert.into()),
    }
}

/// Shows the yearly items and the monthly cost they imply.
pub async fn yearly_list(config: Config, mode: Mode) -> Result<Out<GoalsRender>> {
    let mut view = GoalsView::new(WebApp::new(&config, mode));
    view.refresh().await;
    let render = view.render();
    let mut lines = vec!["yearly items:".to_string()];
    if render.yearly.is_empty() {
        lines.push("  (none yet)".to_string());
    }
    for row in &render.yearly {
        lines.push(format!("  {}", row.title));
        for line in &row.lines {
            lines.push(format!("    {line}"));
        }
    }
    lines.push(render.monthly_cost.clone());
    Ok(Out::new(lines.join("\n"), render))
}

/// Saves a new yearly budget item and shows the refreshed list.
pub async fn add_yearly(
    config: Config,
    mode: Mode,
    args: &AddYearlyArgs,
) -> Result<Out<GoalsRender>> {
    let mut view = GoalsView::new(WebApp::new(&config, mode));
    view.refresh().await;
    let input = YearlyInput {
        name: args.name().to_string(),
        amount: args.amount(),
    };
    match view.save_yearly(&input).await {
        SaveOutcome::Saved { id } => {
            view.refresh().await;
            let render = view.render();
            let message = format!(
                "Saved yearly item '{}' ({id})\n{}",
                input.name.trim(),
                render_message(&render)
            );
            Ok(Out::new(message, render))
        }
        SaveOutcome::Invalid(alert) | SaveOutcome::Failed(alert) => Ok(alert.into()),
    }
}

/// Shows the 50/30/20 split of the income recorded for the given month (default: this month).
pub async fn split(config: Config, mode: Mode, month: Option<&str>) -> Result<Out<BudgetSplit>> {
    let (year, month) = parse_month(month)?;
    let mut view = GoalsView::new(WebApp::new(&config, mode));
    let split = view.budget_split(year, month).await;
    let message = format!(
        "income for {year}-{month:02}: {} ILS\nneeds (50%): {} ILS\nwants (30%): {} ILS\nsavings (20%): {} ILS",
        split.income, split.needs, split.wants, split.savings
    );
    Ok(Out::new(message, split))
}

fn parse_month(month: Option<&str>) -> Result<(i32, u32)> {
    let Some(raw) = month else {
        let now = chrono::Local::now();
        return Ok((now.year(), now.month()));
    };
    let (year, month) = raw
        .split_once('-')
        .with_context(|| format!("Expected YYYY-MM, got '{raw}'"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("Expected YYYY-MM, got '{raw}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Expected YYYY-MM, got '{raw}'"))?;
    anyhow::ensure!(
        (1..=12).contains(&month),
        "The month in '{raw}' must be between 01 and 12"
    );
    Ok((year, month))
}

fn render_message(render: &GoalsRender) -> String {
    let mut lines = vec!["goals:".to_string()];
    if render.goals.is_empty() {
        lines.push("  (none yet)".to_string());
    }
    for row in &render.goals {
        lines.push(format!("  {}", row.title));
        for line in &row.lines {
            lines.push(format!("    {line}"));
        }
    }
    lines.push("yearly items:".to_string());
    if render.yearly.is_empty() {
        lines.push("  (none yet)".to_string());
    }
    for row in &render.yearly {
        lines.push(format!("  {}", row.title));
        for line in &row.lines {
            lines.push(format!("    {line}"));
        }
    }
    lines.push(render.monthly_cost.clone());
    lines.join("\n")
}
