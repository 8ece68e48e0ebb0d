use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` pointing at `gas_url`.
///
/// # Arguments
/// - `budget_home` - The directory that will be the root of the data directory, e.g.
///   `$HOME/budget`
/// - `gas_url` - The URL of the deployed Google Apps Script web app, e.g.
///   https://script.google.com/macros/s/XXXX/exec
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(budget_home: &Path, gas_url: &str) -> Result<Out<()>> {
    let _config = Config::create(budget_home, gas_url)
        .await
        .context("Unable to create the data directory and config")?;
    Ok("Successfully created the budget directory and config".into())
}
