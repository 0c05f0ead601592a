//! Subprocess plugins.
//!
//! Every executable file in the plugin directory becomes a command named
//! after the file. Invoking it runs the program with the line's arguments
//! and copies its output into the context's sinks.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;

use crate::command::{Command, CommandError, Outcome};
use crate::context::Context;
use crate::provider::{ProviderError, RegistryProvider};
use crate::registry::{CommandRegistry, is_valid_name};

/// Loads commands from a directory of executables.
#[derive(Debug, Clone)]
pub struct PluginDirProvider {
    dir: PathBuf,
}

impl PluginDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn io_error(&self, source: std::io::Error) -> ProviderError {
        ProviderError::Io {
            path: self.dir.clone(),
            source,
        }
    }
}

impl RegistryProvider for PluginDirProvider {
    fn name(&self) -> &str {
        "plugins"
    }

    fn registry(&self) -> Result<CommandRegistry, ProviderError> {
        let mut registry = CommandRegistry::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(dir = %self.dir.display(), "plugin directory not found, skipping");
                return Ok(registry);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        for entry in entries {
            let path = entry.map_err(|e| self.io_error(e))?.path();

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping plugin with non UTF-8 name");
                continue;
            };
            if name.starts_with('.') || !is_executable(&path) {
                continue;
            }
            if !is_valid_name(name) {
                tracing::warn!(path = %path.display(), "skipping plugin with invalid command name");
                continue;
            }

            let name = name.to_string();
            tracing::debug!(command = %name, path = %path.display(), "found plugin");
            registry.register(PluginCommand::new(name, path))?;
        }

        Ok(registry)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

/// An external program run as a shell command.
#[derive(Debug, Clone)]
pub struct PluginCommand {
    name: String,
    path: PathBuf,
    summary: String,
}

impl PluginCommand {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let summary = format!("External command ({})", path.display());
        Self {
            name: name.into(),
            path,
            summary,
        }
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<(), CommandError> {
        let child = tokio::process::Command::new(&self.path)
            .args(args.get(1..).unwrap_or_default())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::select! {
            output = child.wait_with_output() => output?,
            _ = ctx.cancellation().cancelled() => {
                return Err(CommandError::Failed("interrupted".into()));
            }
        };

        ctx.stdout().write_all(&output.stdout)?;
        ctx.stderr().write_all(&output.stderr)?;

        match output.status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(CommandError::Exit { code }),
            None => Err(CommandError::Failed("terminated by signal".into())),
        }
    }
}

#[async_trait]
impl Command for PluginCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    async fn exec(&self, ctx: Context, args: Vec<String>) -> Outcome {
        let result = self.run(&ctx, &args).await;
        Outcome { ctx, result }
    }
}
