use std::{env, path::PathBuf};

use trip_config::{Config, ConfigManager};
use trip_storage_json::JsonTripStore;

use super::commands;
use super::core::CliError;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use crate::currency::LocaleFormatter;
use crate::errors::LedgerError;

/// Overrides the data root (`~/.trip_ledger` by default).
pub const HOME_ENV: &str = "TRIP_LEDGER_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
    OneShot,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: JsonTripStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub formatter: LocaleFormatter,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, resolve_base_dir())
    }

    /// Context whose config and trips live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager =
            ConfigManager::with_base_dir(base.clone()).map_err(LedgerError::from)?;
        let config = config_manager.load().map_err(LedgerError::from)?;
        let root = config.default_trip_root.clone().unwrap_or(base);
        let store = JsonTripStore::with_root(&root).map_err(LedgerError::from)?;

        let mut context = ShellContext {
            mode,
            registry,
            store,
            config_manager,
            formatter: LocaleFormatter::from_config(&config),
            config,
            running: true,
        };
        context.apply_config();
        Ok(context)
    }

    /// Pushes config-derived settings into the formatter and output.
    pub(crate) fn apply_config(&mut self) {
        self.formatter = LocaleFormatter::from_config(&self.config);
        output::set_color_enabled(self.config.ui_color_enabled);
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Names and aliases offered for completion.
    pub fn command_words(&self) -> Vec<String> {
        self.registry.words().map(str::to_string).collect()
    }

    pub fn prompt(&self) -> String {
        match &self.config.last_opened_trip {
            Some(slug) => format!("trip[{slug}]> "),
            None => "trip> ".to_string(),
        }
    }
}

/// `$TRIP_LEDGER_HOME`, else the configured default root.
pub fn resolve_base_dir() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => Config::default().resolve_default_trip_root(),
    }
}
