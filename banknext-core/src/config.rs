//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "apiBaseUrl": "http://localhost:8080/api",
//!   "defaultCurrency": "PKR"
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "BANKNEXT_API_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_currency: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// BankNext client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub default_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_currency: "PKR".to_string(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// `BANKNEXT_API_URL` takes precedence over the file. A missing or
    /// unreadable file yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = Self::read_settings(data_dir)?;
        let defaults = Self::default();

        let api_base_url = match std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => raw.api_base_url.unwrap_or(defaults.api_base_url),
        };

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url)?,
            default_currency: raw
                .default_currency
                .map(|c| c.to_uppercase())
                .unwrap_or(defaults.default_currency),
        })
    }

    /// Save config to the data directory, keeping unmanaged keys
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let settings_path = data_dir.join("settings.json");

        let mut settings = Self::read_settings(data_dir)?;
        settings.api_base_url = Some(self.api_base_url.clone());
        settings.default_currency = Some(self.default_currency.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Point the client at a different backend
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(())
    }

    fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
        let settings_path = data_dir.join("settings.json");
        if !settings_path.exists() {
            return Ok(SettingsFile::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }
}

/// Validate an API base URL and strip any trailing slash
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| Error::config(format!("Invalid API URL '{}': {}", raw, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::config(format!(
            "API URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(Error::config(format!("API URL '{}' has no host", raw)));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
