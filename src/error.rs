//! Error types. CLI and config paths use `anyhow`; the remote-call boundary uses the tagged
//! `ApiError` so that views can treat any failure as "no data" instead of propagating it.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// A failed remote call. Every failure at the API boundary is converted into one of these tags
/// rather than raised through the view layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The GAS web app URL has not been configured. No network access is attempted.
    #[error("the GAS web app URL is not configured, run `budget init` first")]
    MissingBaseUrl,

    /// The request could not be sent or the response never arrived.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("the server answered with HTTP status {0}")]
    HttpStatus(u16),

    /// The response body was not JSON, or the envelope was missing its `ok` flag.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The server answered `ok: false` with the given error code.
    #[error("the server reported an error: {0}")]
    Remote(String),
}

impl ApiError {
    /// A stable error-code string matching what the GAS web app itself uses in its envelopes.
    pub fn code(&self) -> String {
        match self {
            ApiError::MissingBaseUrl => "NO_GAS_URL".to_string(),
            ApiError::Transport(_) => "FETCH_ERROR".to_string(),
            ApiError::HttpStatus(status) => format!("HTTP_{status}"),
            ApiError::MalformedResponse(_) => "BAD_RESPONSE".to_string(),
            ApiError::Remote(code) => code.clone(),
        }
    }
}
