//! View controllers.
//!
//! Each controller owns its in-memory state for the session and follows the same pipeline on
//! load and on user-driven changes: fetch through the [`WebApp`](crate::api::WebApp), normalize,
//! aggregate, and produce a render model. Rendering is a pure function of controller state; the
//! actual drawing (terminal, canvas, whatever hosts the views) consumes the render model and is
//! out of scope here.
//!
//! A remote failure of any kind degrades to an empty-state render. Nothing in this module
//! propagates an error to the user.

mod chart;
mod goals;

pub use chart::{present, ChartRender, ChartView, PieSurface};
pub use goals::{GoalInput, GoalsRender, GoalsView, ListRow, SaveOutcome, YearlyInput};
