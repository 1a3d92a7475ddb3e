use std::collections::BTreeMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub aliases: &'static [&'static str],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            aliases: &[],
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Commands in registration order, looked up case-insensitively by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: BTreeMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing an earlier command with the same name.
    /// Aliases never shadow another command's primary name.
    pub fn register(&mut self, entry: CommandEntry) {
        let key = entry.name.to_ascii_lowercase();
        let existing = self.lookup.get(&key).copied();
        let index = match existing {
            Some(index) if self.entries[index].name.eq_ignore_ascii_case(entry.name) => {
                self.lookup.retain(|_, slot| *slot != index);
                self.entries[index] = entry;
                index
            }
            _ => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };

        let entry = &self.entries[index];
        self.lookup.insert(key, index);
        for alias in entry.aliases {
            let alias = alias.to_ascii_lowercase();
            let taken_by_name = self
                .lookup
                .get(&alias)
                .is_some_and(|&other| self.entries[other].name.eq_ignore_ascii_case(&alias));
            if !taken_by_name {
                self.lookup.insert(alias, index);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup
            .get(&name.trim().to_ascii_lowercase())
            .map(|&index| &self.entries[index])
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Every name and alias the registry answers to, sorted.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.lookup.keys().map(String::as_str)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}
