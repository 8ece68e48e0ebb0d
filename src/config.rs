//! Configuration file handling.
//!
//! The configuration file is stored at `$BUDGET_HOME/config.json` and holds the single setting
//! this app needs: the URL of the deployed Google Apps Script web app that fronts the family
//! budget spreadsheet.

use crate::{util, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "budget";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// Represents the app configuration. Instantiate it with the path to `$BUDGET_HOME` and it loads
/// `$BUDGET_HOME/config.json` from there.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the budget home directory and writes an initial `config.json` holding `gas_url`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the budget home, e.g. `$HOME/budget`
    /// - `gas_url` - The URL of the deployed GAS web app, e.g.
    ///   https://script.google.com/macros/s/XXXXX/exec. May be empty; remote calls will fail with
    ///   `NO_GAS_URL` until it is set.
    pub async fn create(dir: impl Into<PathBuf>, gas_url: &str) -> Result<Self> {
        let maybe_relative = dir.into();
        util::make_dir(&maybe_relative)
            .await
            .context("Unable to create the budget home directory")?;
        let root = util::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            gas_base_url: gas_url.to_string(),
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Validates that the budget home and its config file exist, then loads the configuration.
    pub async fn load(budget_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = budget_home.into();
        let root = util::canonicalize(&maybe_relative)
            .await
            .context("Budget home is missing, run `budget init` first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The URL of the GAS web app. May be empty when not yet configured.
    pub fn gas_base_url(&self) -> &str {
        &self.config_file.gas_base_url
    }
}

/// Represents the serialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "budget",
///   "config_version": 1,
///   "gas_base_url": "https://script.google.com/macros/s/XXXXX/exec"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "budget"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// URL of the deployed Google Apps Script web app
    gas_base_url: String,
}

impl ConfigFile {
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = util::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        util::write(path.as_ref(), data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("budget_home");
        let url = "https://script.google.com/macros/s/AKfycbyXYZ/exec";

        let created = Config::create(&home, url).await.unwrap();
        assert_eq!(created.gas_base_url(), url);
        assert!(created.config_path().is_file());

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.gas_base_url(), url);
        assert_eq!(loaded.root(), created.root());
    }

    #[tokio::test]
    async fn test_config_create_with_empty_url() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home"), "").await.unwrap();
        assert_eq!(config.gas_base_url(), "");
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "gas_base_url": "https://example.com/exec"
        }"#;
        util::write(&dir.path().join("config.json"), json)
            .await
            .unwrap();

        let result = Config::load(dir.path()).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }
}
