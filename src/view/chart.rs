//! The category pie-chart view.
//!
//! Two user-selectable controls feed it: the aggregation mode (all/income/expense) and the value
//! mode (percent/amount). Changing either re-runs the whole fetch/aggregate/render pipeline.

use crate::api::WebApp;
use crate::report::{category_totals, display_values, ChartMode, ValueMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the chart should show after a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRender {
    /// A pie with decorated labels and their final (converted or raw) values.
    Pie {
        labels: Vec<String>,
        values: Vec<Decimal>,
    },
    /// Nothing to draw; show this text instead.
    Placeholder(String),
}

/// A delegated drawing capability. The host supplies one; it owns its redraw/teardown lifecycle
/// (the browser build hands this to a charting library, the CLI draws text bars).
pub trait PieSurface {
    fn draw(&mut self, labels: &[String], values: &[Decimal]);
    fn destroy(&mut self);
}

/// Applies a render to a surface. Any previous chart is torn down first; a placeholder leaves
/// the surface empty.
pub fn present(surface: &mut dyn PieSurface, render: &ChartRender) {
    surface.destroy();
    if let ChartRender::Pie { labels, values } = render {
        surface.draw(labels, values);
    }
}

/// Controller for the pie-chart view. Owns the two control settings for the session.
pub struct ChartView {
    api: WebApp,
    mode: ChartMode,
    value_mode: ValueMode,
}

impl ChartView {
    pub fn new(api: WebApp) -> Self {
        Self {
            api,
            mode: ChartMode::default(),
            value_mode: ValueMode::default(),
        }
    }

    /// A view that starts from the given control settings instead of the defaults.
    pub fn with_settings(api: WebApp, mode: ChartMode, value_mode: ValueMode) -> Self {
        Self {
            api,
            mode,
            value_mode,
        }
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn value_mode(&self) -> ValueMode {
        self.value_mode
    }

    /// Runs the pipeline: fetch, aggregate per the current controls, decorate. A failed fetch or
    /// an empty result renders the placeholder, never an error.
    pub async fn refresh(&mut self) -> ChartRender {
        let transactions = match self.api.fetch_transactions().await {
            Ok(transactions) => transactions,
            Err(e) => {
                debug!("chart fetch failed ({}), rendering placeholder", e.code());
                return ChartRender::Placeholder(NO_DATA.to_string());
            }
        };

        let totals = category_totals(&transactions, self.mode);
        if totals.is_empty() {
            return ChartRender::Placeholder(NO_DATA.to_string());
        }

        let display = display_values(&totals, self.value_mode);
        ChartRender::Pie {
            labels: display.labels,
            values: display.values,
        }
    }

    /// Control change: switch the aggregation mode and re-render.
    pub async fn set_mode(&mut self, mode: ChartMode) -> ChartRender {
        self.mode = mode;
        self.refresh().await
    }

    /// Control change: switch the value mode and re-render.
    pub async fn set_value_mode(&mut self, value_mode: ValueMode) -> ChartRender {
        self.value_mode = value_mode;
        self.refresh().await
    }
}

const NO_DATA: &str = "no data";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TestGas, Transport, WebApp};
    use crate::ApiError;
    use serde_json::{json, Value};

    struct Canned(Value);

    #[async_trait::async_trait]
    impl Transport for Canned {
        async fn call(&mut self, _: &str, _: &[(&str, String)]) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn view_with(value: Value) -> ChartView {
        ChartView::new(WebApp::with_transport(Box::new(Canned(value))))
    }

    // Scenario A rendered end to end.
    #[tokio::test]
    async fn test_refresh_renders_pie() {
        let mut view = view_with(json!({
            "ok": true,
            "transactions": [
                {"id": "1", "type": "income", "categories": ["salary"], "amount": 1000},
                {"id": "2", "type": "expense", "categories": ["food"], "amount": 200},
            ],
        }));
        let render = view.set_value_mode(crate::report::ValueMode::Amount).await;
        match render {
            ChartRender::Pie { labels, values } => {
                assert_eq!(labels, vec!["salary (1000.00 ILS)", "food (200.00 ILS)"]);
                assert_eq!(values, vec![1000.into(), 200.into()]);
            }
            other => panic!("expected a pie, got {other:?}"),
        }
    }

    // Scenario C: empty data renders the placeholder and no chart is drawn.
    #[tokio::test]
    async fn test_empty_data_renders_placeholder() {
        let mut view = view_with(json!({ "ok": true, "transactions": [] }));
        let render = view.refresh().await;
        assert_eq!(render, ChartRender::Placeholder("no data".to_string()));

        let mut surface = RecordingSurface::default();
        present(&mut surface, &render);
        assert_eq!(surface.destroys, 1);
        assert!(surface.draws.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_renders_placeholder() {
        let mut view = view_with(json!({ "ok": false, "error": "SHEET_LOCKED" }));
        assert!(matches!(view.refresh().await, ChartRender::Placeholder(_)));

        let mut view = view_with(json!({ "ok": true, "transactions": "oops" }));
        assert!(matches!(view.refresh().await, ChartRender::Placeholder(_)));
    }

    #[tokio::test]
    async fn test_mode_switch_refilters() {
        let mut view = view_with(json!({
            "ok": true,
            "transactions": [
                {"id": "1", "type": "income", "categories": ["salary"], "amount": 1000},
                {"id": "2", "type": "expense", "categories": ["food"], "amount": 200},
            ],
        }));
        // Scenario B: expense + percent leaves one category at 100%.
        let render = view.set_mode(crate::report::ChartMode::Expense).await;
        match render {
            ChartRender::Pie { labels, values } => {
                assert_eq!(labels, vec!["food (100.0%)"]);
                assert_eq!(values, vec![100.into()]);
            }
            other => panic!("expected a pie, got {other:?}"),
        }
    }

    // Two refreshes over unchanged remote data must render identically.
    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let mut view = ChartView::new(WebApp::with_transport(Box::new(TestGas::default())));
        let first = view.refresh().await;
        let second = view.refresh().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_present_tears_down_before_drawing() {
        let render = ChartRender::Pie {
            labels: vec!["a".to_string()],
            values: vec![1.into()],
        };
        let mut surface = RecordingSurface::default();
        present(&mut surface, &render);
        present(&mut surface, &render);
        assert_eq!(surface.destroys, 2);
        assert_eq!(surface.draws.len(), 2);
    }

    #[derive(Default)]
    struct RecordingSurface {
        draws: Vec<(Vec<String>, Vec<Decimal>)>,
        destroys: usize,
    }

    impl PieSurface for RecordingSurface {
        fn draw(&mut self, labels: &[String], values: &[Decimal]) {
            self.draws.push((labels.to_vec(), values.to_vec()));
        }

        fn destroy(&mut self) {
            self.destroys += 1;
        }
    }
}
