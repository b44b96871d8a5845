//! Configuration management
//!
//! Settings live in `settings.json` inside the spendlens directory:
//! ```json
//! {
//!   "currency": "QAR ",
//!   "logLevel": "info",
//!   "categoryRules": [
//!     { "category": "Coffee", "keywords": ["starbucks", "costa"] }
//!   ]
//! }
//! ```
//! `categoryRules`, when present, replaces the built-in table; list order
//! is match priority.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::{CategoryRule, CategoryRuleSet};

/// Overrides the configured currency symbol
pub const CURRENCY_ENV_VAR: &str = "SPENDLENS_CURRENCY";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_rules: Option<Vec<CategoryRule>>,
    /// Keys written by other tools, preserved on save
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Symbol prefixed to money amounts in reports
    pub currency: String,
    /// Default tracing level when `SPENDLENS_LOG` is unset
    pub log_level: String,
    /// Ordered rule override; `None` means the built-in table
    pub category_rules: Option<Vec<CategoryRule>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            log_level: "warn".to_string(),
            category_rules: None,
        }
    }
}

impl Config {
    /// Load config from the spendlens directory
    ///
    /// A missing or malformed settings file yields the defaults.
    /// `SPENDLENS_CURRENCY` takes precedence over the file.
    pub fn load(dir: &Path) -> Result<Self> {
        let raw = read_settings(dir)?;
        let defaults = Self::default();

        let currency = std::env::var(CURRENCY_ENV_VAR)
            .ok()
            .or(raw.currency)
            .unwrap_or(defaults.currency);

        Ok(Self {
            currency,
            log_level: raw.log_level.unwrap_or(defaults.log_level),
            category_rules: raw.category_rules,
        })
    }

    /// Save config to the spendlens directory
    /// Preserves other settings that spendlens doesn't manage
    pub fn save(&self, dir: &Path) -> Result<()> {
        let mut settings = read_settings(dir)?;

        settings.currency = Some(self.currency.clone());
        settings.log_level = Some(self.log_level.clone());
        settings.category_rules = self.category_rules.clone();

        std::fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// The rule table categorization runs against
    pub fn rule_set(&self) -> Arc<CategoryRuleSet> {
        match &self.category_rules {
            Some(rules) => Arc::new(CategoryRuleSet::new(rules.clone())),
            None => CategoryRuleSet::builtin(),
        }
    }
}

fn read_settings(dir: &Path) -> Result<SettingsFile> {
    let settings_path = dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(config.category_rules.is_none());
        assert_eq!(config.rule_set().rules().len(), 15);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_custom_rules_replace_builtin() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{
                "logLevel": "debug",
                "categoryRules": [
                    { "category": "Coffee", "keywords": ["STARBUCKS", " costa "] }
                ]
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        let rules = config.rule_set();
        assert_eq!(rules.rules().len(), 1);
        assert_eq!(rules.categorize("COSTA COFFEE DOHA"), "Coffee");
        assert_eq!(rules.categorize("UBER"), "Other");
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "theme": "dark", "logLevel": "info" }"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.log_level = "error".to_string();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["logLevel"], "error");
        assert!(value.get("categoryRules").is_none());
    }
}
