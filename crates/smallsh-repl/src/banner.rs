//! Startup banner and command-count hint.

use std::io::{self, Write};

use smallsh_kernel::{CommandRegistry, Context};

const SPLASH: &str = r"
      _    _    _    _    _    _    _
     / \  / \  / \  / \  / \  / \  / \
    ( S )( M )( A )( L )( L )( S )( H )
     \_/  \_/  \_/  \_/  \_/  \_/  \_/
";

/// The line(s) printed after the splash, based on what was loaded.
pub fn startup_hint(commands: &CommandRegistry) -> String {
    if commands.is_empty() {
        "\nNo commands found\n".to_string()
    } else if commands.contains("help") {
        format!(
            "\nLoaded {} command(s)...\nType help for available commands\n\n",
            commands.len()
        )
    } else {
        String::new()
    }
}

/// Print the splash (if enabled) and the hint to the context's stdout.
pub fn print_startup(ctx: &Context, splash: bool) -> io::Result<()> {
    let mut out = ctx.stdout();
    if splash {
        writeln!(out, "{SPLASH}")?;
    }
    write!(out, "{}", startup_hint(ctx.commands()))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallsh_kernel::{BuiltinProvider, RegistryProvider};

    #[test]
    fn test_hint_with_help() {
        let registry = BuiltinProvider.registry().unwrap();
        let hint = startup_hint(&registry);
        assert!(hint.contains("Loaded 3 command(s)..."));
        assert!(hint.contains("Type help for available commands"));
    }

    #[test]
    fn test_hint_without_help() {
        let builtins = BuiltinProvider.registry().unwrap();
        let mut registry = CommandRegistry::new();
        registry.insert("echo", builtins.get("echo").unwrap()).unwrap();
        assert_eq!(startup_hint(&registry), "");
    }

    #[test]
    fn test_hint_empty() {
        assert_eq!(startup_hint(&CommandRegistry::new()), "\nNo commands found\n");
    }
}
