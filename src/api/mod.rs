//! The remote-call layer.
//!
//! Every interaction with the spreadsheet goes through the GAS web app: the client sends a named
//! `action` plus flat string parameters in a GET query string, and the web app answers with a
//! JSON envelope, `{ok: true, ...}` on success or `{ok: false, error: CODE}` on failure.
//!
//! The [`Transport`] trait is the seam between "how bytes move" and "what the actions mean".
//! [`WebApp`] holds a transport and exposes one typed wrapper per remote action; the wrappers
//! name their parameters and forward them unchanged, nothing more.

mod gas_client;
mod test_client;
mod web_app;

use crate::ApiError;
use serde_json::Value;

pub(crate) use gas_client::GasClient;
pub use test_client::TestGas;
pub use web_app::{NewBill, NewTransaction, WebApp};

/// Moves one request/response pair. One implementation speaks HTTP to the deployed web app, one
/// serves seeded data from memory so the whole app can run without a deployment.
///
/// No retries, no timeouts, no deduplication: every call is independent and stateless.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Issues one remote call and returns the decoded JSON body.
    async fn call(
        &mut self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ApiError>;
}
