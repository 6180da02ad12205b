//! User settings for the expense tracker
//!
//! Holds the remote API location, request timeout and display preferences.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the expense API (the `/expenses` resource lives below it)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Currency symbol shown next to the total
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for the TUI expense list (strftime format). The form and
    /// the CLI always use YYYY-MM-DD.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Parse and validate the configured API base URL
    pub fn api_url(&self) -> Result<Url, ExpenseError> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            ExpenseError::Config(format!("Invalid API URL '{}': {}", self.api_base_url, e))
        })?;

        if url.cannot_be_a_base() {
            return Err(ExpenseError::Config(format!(
                "API URL '{}' cannot be used as a base",
                self.api_base_url
            )));
        }

        Ok(url)
    }

    /// The per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:4000/api");
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.currency_symbol, "₹");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.api_base_url = "https://expenses.example.com/v1".into();
        settings.currency_symbol = "$".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.api_base_url, "https://expenses.example.com/v1");
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.request_timeout_secs, 30);
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_invalid_api_url() {
        let mut settings = Settings::default();
        settings.api_base_url = "not a url".into();
        assert!(matches!(settings.api_url(), Err(ExpenseError::Config(_))));

        settings.api_base_url = "mailto:someone@example.com".into();
        assert!(settings.api_url().is_err());
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let mut settings = Settings::default();
        settings.request_timeout_secs = 0;
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
    }
}
