//! Registry providers: where the shell's commands come from.
//!
//! A provider is asked exactly once, at startup, for the commands it
//! contributes. The kernel merges providers in order, so a later provider
//! silently replaces an earlier command of the same name.

use std::path::PathBuf;

use thiserror::Error;

use crate::builtin::register_builtins;
use crate::registry::{CommandRegistry, RegistryError};

/// Failure to produce a registry.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A source of commands.
pub trait RegistryProvider: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Produce this provider's commands.
    fn registry(&self) -> Result<CommandRegistry, ProviderError>;
}

/// The statically linked built-in commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinProvider;

impl RegistryProvider for BuiltinProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    fn registry(&self) -> Result<CommandRegistry, ProviderError> {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry)?;
        Ok(registry)
    }
}

/// A fixed, pre-built registry. Handy for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    registry: CommandRegistry,
}

impl StaticProvider {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }
}

impl RegistryProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn registry(&self) -> Result<CommandRegistry, ProviderError> {
        Ok(self.registry.clone())
    }
}
