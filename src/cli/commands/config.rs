use trip_config::Config;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value @ ..] if !value.is_empty() => {
            let value = value.join(" ");
            context.config.set(key, &value)?;
            context.persist_config()?;
            context.apply_config();
            output::success(format!("Set {key} = {value}."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show|set <key> <value>]; keys: {}",
            Config::KEYS.join(", ")
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        let value = context.config.get(key).unwrap_or_default();
        output::line(format!("  {:<20} {}", key, value));
    }
    if let Some(trip) = &context.config.last_opened_trip {
        output::line(format!("  {:<20} {}", "last_opened_trip", trip));
    }
    output::line(format!(
        "  {:<20} {}",
        "config_file",
        context.config_manager.config_path().display()
    ));
    output::line(format!(
        "  {:<20} {}",
        "trips_dir",
        context.store.trips_dir().display()
    ));
    Ok(())
}
