//! Built-in commands for smallsh.
//!
//! These are always available and are what the shell ships with when no
//! plugin directory is configured.

mod echo;
mod help;
mod prompt;

pub use echo::Echo;
pub use help::Help;
pub use prompt::Prompt;

use crate::registry::{CommandRegistry, RegistryError};

/// Register all built-in commands with the registry.
pub fn register_builtins(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(Help)?;
    registry.register(Echo)?;
    registry.register(Prompt)?;
    Ok(())
}
