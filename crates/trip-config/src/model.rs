use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trip_domain::{ContributionBasis, ReconciliationPolicy};

use crate::ConfigError;

const DEFAULT_DIR_NAME: &str = ".trip_ledger";

/// Stores user-configurable preferences for settlement and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub contribution_basis: ContributionBasis,
    #[serde(default)]
    pub reconciliation: ReconciliationPolicy,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_trip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for trip snapshots. Defaults to `~/.trip_ledger`.
    pub default_trip_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            contribution_basis: ContributionBasis::default(),
            reconciliation: ReconciliationPolicy::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            last_opened_trip: None,
            default_trip_root: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "contribution_basis",
        "reconciliation",
        "ui_color_enabled",
        "default_trip_root",
    ];

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_default_trip_root(&self) -> PathBuf {
        if let Some(path) = &self.default_trip_root {
            return path.clone();
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Updates a single setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: key.to_string(),
            reason,
        };
        match key {
            "locale" => self.locale = value.trim().to_string(),
            "currency" => {
                let code = value.trim().to_ascii_uppercase();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid(format!("`{value}` is not an ISO 4217 code")));
                }
                self.currency = code;
            }
            "contribution_basis" => self.contribution_basis = value.parse().map_err(invalid)?,
            "reconciliation" => self.reconciliation = value.parse().map_err(invalid)?,
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    other => return Err(invalid(format!("expected true/false, got `{other}`"))),
                }
            }
            "default_trip_root" => {
                let trimmed = value.trim();
                self.default_trip_root = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Current value of a setting in its textual form.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "contribution_basis" => self.contribution_basis.to_string(),
            "reconciliation" => self.reconciliation.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "default_trip_root" => self.resolve_default_trip_root().display().to_string(),
            _ => return None,
        };
        Some(value)
    }
}
