//! User settings for FinanceFlow
//!
//! Preferences that shape calculations and housekeeping: the currency
//! symbol, FNPF contribution rates and backup retention.

use serde::{Deserialize, Serialize};

use super::paths::FlowPaths;
use crate::calculators::FnpfRates;
use crate::error::FlowError;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// FNPF rates used when a salary is entered without explicit rates
    #[serde(default)]
    pub fnpf_rates: FnpfRates,

    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Write a backup before every month rollover
    #[serde(default = "default_true")]
    pub backup_before_rollover: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            fnpf_rates: FnpfRates::default(),
            backup_retention: BackupRetention::default(),
            backup_before_rollover: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &FlowPaths) -> Result<Self, FlowError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FlowError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FlowError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings
            .fnpf_rates
            .validate()
            .map_err(|e| FlowError::Config(format!("Invalid FNPF rates: {}", e)))?;

        Ok(settings)
    }

    pub fn save(&self, paths: &FlowPaths) -> Result<(), FlowError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FlowError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FlowError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
