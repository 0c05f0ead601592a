//! Command-line flags, with environment fallbacks.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::BoolishValueParser;

use smallsh_kernel::{DEFAULT_PROMPT, KernelConfig};

/// smallsh — a small pluggable command shell.
#[derive(Debug, Clone, Parser)]
#[command(name = "smallsh", version, about)]
pub struct Cli {
    /// Initial prompt text.
    #[arg(long, env = "SMALLSH_PROMPT", default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Directory of executables to load as commands.
    #[arg(long, env = "SMALLSH_PLUGINS_DIR", value_name = "DIR")]
    pub plugins_dir: Option<PathBuf>,

    /// Skip the startup banner.
    #[arg(
        long,
        env = "SMALLSH_NO_BANNER",
        value_parser = BoolishValueParser::new()
    )]
    pub no_banner: bool,
}

impl Cli {
    pub fn kernel_config(&self) -> KernelConfig {
        KernelConfig {
            prompt: self.prompt.clone(),
            plugins_dir: self.plugins_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["smallsh"]).unwrap();
        let config = cli.kernel_config();
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert!(config.plugins_dir.is_none());
        assert!(!cli.no_banner);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "smallsh",
            "--prompt",
            "$",
            "--plugins-dir",
            "/opt/plugins",
            "--no-banner",
        ])
        .unwrap();

        let config = cli.kernel_config();
        assert_eq!(config.prompt, "$");
        assert_eq!(config.plugins_dir, Some(PathBuf::from("/opt/plugins")));
        assert!(cli.no_banner);
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
