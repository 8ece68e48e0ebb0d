//! Implements the `Transport` trait over HTTP against the deployed GAS web app.

use crate::api::Transport;
use crate::ApiError;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Talks to the GAS web app with one GET request per call. The web app only accepts query-string
/// parameters, so list-valued parameters must already be JSON-encoded strings by the time they
/// reach this layer.
pub(crate) struct GasClient {
    base_url: String,
    http: reqwest::Client,
}

impl GasClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for GasClient {
    async fn call(&mut self, action: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        if self.base_url.is_empty() {
            warn!("the GAS web app URL has not been configured");
            return Err(ApiError::MissingBaseUrl);
        }
        let url = build_url(&self.base_url, action, params)?;
        debug!("calling action '{action}'");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

/// Builds `<base>?action=<action>&<params>` with proper percent-encoding.
fn build_url(base: &str, action: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
    let pairs = std::iter::once(("action", action.to_string()))
        .chain(params.iter().map(|(k, v)| (*k, v.clone())));
    Url::parse_with_params(base, pairs).map_err(|e| ApiError::Transport(e.to_string()))
}
