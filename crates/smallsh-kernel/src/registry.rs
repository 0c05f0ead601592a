//! Command registry for looking up commands by name.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::command::Command;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid command name {name:?}: must be non-empty and contain no whitespace")]
    InvalidName { name: String },
}

/// Registry of available commands.
///
/// Names are case-sensitive and matched exactly. Registering a name twice
/// replaces the earlier command.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its own name.
    pub fn register(&mut self, command: impl Command + 'static) -> Result<(), RegistryError> {
        let name = command.name().to_string();
        self.insert(name, Arc::new(command))
    }

    /// Register a command under an explicit name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        command: Arc<dyn Command>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(RegistryError::InvalidName { name });
        }
        if self.commands.insert(name.clone(), command).is_some() {
            tracing::debug!(command = %name, "replaced existing command");
        }
        Ok(())
    }

    /// Copy every entry of `other` into this registry, last writer wins.
    pub fn merge(&mut self, other: CommandRegistry) {
        for (name, command) in other.commands {
            if self.commands.insert(name.clone(), command).is_some() {
                tracing::debug!(command = %name, "replaced existing command");
            }
        }
    }

    /// Look up a command by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// List all command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Iterate `(name, command)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Command>)> {
        let mut entries: Vec<_> = self.commands.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A name the dispatcher could ever resolve.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
