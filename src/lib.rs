pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod report;
mod util;
pub mod view;

pub use config::Config;
pub use error::ApiError;
pub use error::Error;
pub use error::Result;

/// Selects the transport used for remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Talk to the real Google Apps Script web app over HTTP.
    #[default]
    Gas,
    /// Use the in-memory transport seeded with sample data.
    Test,
}

impl Mode {
    /// Returns `Mode::Test` when `BUDGET_IN_TEST_MODE` is set and non-empty. This allows running
    /// the whole app, top-to-bottom, without a deployed GAS web app.
    pub fn from_env() -> Self {
        match std::env::var("BUDGET_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Gas,
        }
    }
}
