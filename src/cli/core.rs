//! Dispatch, errors, and shared helpers for the command shell.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use trip_config::ConfigError;
use trip_core::{CoreError, LedgerDataProvider};
use trip_domain::Trip;
use uuid::Uuid;

use crate::cli::output;
pub use crate::cli::shell_context::{CliMode, ShellContext};
use crate::errors::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
    /// A one-shot command failed after its error was already printed.
    #[error("command failed")]
    CommandFailed,
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Ledger(LedgerError::Io(err))
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`.")]
    UnknownCommand(String),
    #[error("No trip selected. Pass a trip name or `import` one first.")]
    NoTripSelected,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Ledger(LedgerError::Core(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Ledger(LedgerError::Config(err))
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Ledger(LedgerError::Io(err))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::Ledger(LedgerError::Serde(err))
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(raw) else {
            return Err(CommandError::UnknownCommand(raw.to_string()));
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::UnknownCommand(name) => self.suggest_command(&name),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::NoTripSelected => {
                output::error(CommandError::NoTripSelected);
                output::hint("Try `list` to see stored trips.");
            }
            other => output::error(other),
        }
    }

    /// Trip key from the first argument, else the last opened trip.
    pub(crate) fn trip_key(&self, args: &[&str]) -> Result<String, CommandError> {
        if let Some(key) = args.first() {
            return Ok((*key).to_string());
        }
        self.config
            .last_opened_trip
            .clone()
            .ok_or(CommandError::NoTripSelected)
    }

    /// Loads a trip and remembers it as the last opened one.
    pub(crate) fn open_trip(&mut self, key: &str) -> Result<Trip, CommandError> {
        let trip = self.store.load_trip(key)?;
        self.remember_trip(&trip)?;
        Ok(trip)
    }

    pub(crate) fn remember_trip(&mut self, trip: &Trip) -> CommandResult {
        let slug = self.store.stored_slug(trip);
        if self.config.last_opened_trip.as_deref() == Some(slug.as_str()) {
            return Ok(());
        }
        self.config.last_opened_trip = Some(slug);
        self.persist_config()
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn print_warnings(&self, warnings: &[String]) {
        for warning in warnings {
            output::warning(warning);
        }
    }
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_keeps_eight_hex_digits() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("uuid");
        assert_eq!(short_id(id), "67e55044");
    }
}
