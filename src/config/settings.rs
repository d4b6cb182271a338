//! User settings for hoa-ledger
//!
//! Manages user preferences including display formatting, the fund and bank
//! account new invoices start with, and the default duplicate-scan options.

use serde::{Deserialize, Serialize};

use super::paths::HoaPaths;
use crate::duplicates::DetectionConfig;
use crate::error::HoaError;

/// User settings for hoa-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Fund assigned to the balancing line of newly opened invoices
    #[serde(default = "default_fund")]
    pub default_fund: String,

    /// Bank account assigned to the balancing line of newly opened invoices
    #[serde(default)]
    pub default_bank_account: String,

    /// Options passed to the duplicate detector when the CLI gives none
    #[serde(default)]
    pub duplicate_detection: DetectionConfig,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_fund() -> String {
    "Operating".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_fund: default_fund(),
            default_bank_account: String::new(),
            duplicate_detection: DetectionConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &HoaPaths) -> Result<Self, HoaError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| HoaError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| HoaError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HoaPaths) -> Result<(), HoaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HoaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| HoaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_fund, "Operating");
        assert!(settings.default_bank_account.is_empty());
        assert!(settings.duplicate_detection.fuzzy_matching);
        assert!(!settings.duplicate_detection.strict_mode);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HoaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_fund = "Reserve".into();
        settings.default_bank_account = "1010 Reserve Checking".into();
        settings.duplicate_detection.confidence_threshold = 0.95;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_fund, "Reserve");
        assert_eq!(loaded.default_bank_account, "1010 Reserve Checking");
        assert_eq!(loaded.duplicate_detection.confidence_threshold, 0.95);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.default_fund, "Operating");
        assert_eq!(settings.duplicate_detection.confidence_threshold, 0.8);
    }

    #[test]
    fn test_malformed_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HoaPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, HoaError::Config(_)));
    }
}
