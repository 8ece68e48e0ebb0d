use crate::api::WebApp;
use crate::commands::Out;
use crate::report::{ChartMode, ValueMode};
use crate::view::{present, ChartRender, ChartView, PieSurface};
use crate::{Config, Mode, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const BAR_WIDTH: usize = 40;

/// Fetches the transactions and draws the per-category chart as text bars.
pub async fn chart(
    config: Config,
    mode: Mode,
    chart_mode: ChartMode,
    value_mode: ValueMode,
) -> Result<Out<ChartRender>> {
    let mut view = ChartView::with_settings(WebApp::new(&config, mode), chart_mode, value_mode);
    let render = view.refresh().await;

    let mut surface = TextPie::default();
    present(&mut surface, &render);

    let message = match &render {
        ChartRender::Placeholder(text) => text.clone(),
        ChartRender::Pie { .. } => surface.output(),
    };
    Ok(Out::new(message, render))
}

/// Draws the chart as one text bar per category, scaled to the largest value.
#[derive(Default)]
struct TextPie {
    lines: Vec<String>,
}

impl TextPie {
    fn output(&self) -> String {
        self.lines.join("\n")
    }
}

impl PieSurface for TextPie {
    fn draw(&mut self, labels: &[String], values: &[Decimal]) {
        let max = values.iter().copied().max().unwrap_or_default();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for (label, value) in labels.iter().zip(values) {
            let share = if max > Decimal::ZERO {
                (*value / max).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let bar = "#".repeat((share * BAR_WIDTH as f64).round() as usize);
            self.lines.push(format!("{label:<label_width$}  {bar}"));
        }
    }

    fn destroy(&mut self) {
        self.lines.clear();
    }
}
