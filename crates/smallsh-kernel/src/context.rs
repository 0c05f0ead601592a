//! The shell context: immutable state threaded through every dispatch.
//!
//! A [`Context`] is never mutated in place. Each `with_*` method returns a
//! derived context that keeps every binding of its parent and overrides
//! exactly one. Commands receive the current context by value and hand back
//! the context the next command should see.
//!
//! | Field        | Name in docs      | Default                    |
//! |--------------|-------------------|----------------------------|
//! | prompt       | `shell.prompt`    | [`DEFAULT_PROMPT`]         |
//! | stdout       | `shell.stdout`    | process stdout             |
//! | stderr       | `shell.stderr`    | process stderr             |
//! | stdin        | `shell.stdin`     | process stdin              |
//! | commands     | `shell.commands`  | empty registry             |
//! | cancellation | —                 | fresh token                |

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::io::{InputSource, OutputSink};
use crate::registry::CommandRegistry;

/// Prompt rendered when the context carries no prompt of its own.
pub const DEFAULT_PROMPT: &str = "/>";

/// Request-scoped shell state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Context {
    prompt: Option<Arc<str>>,
    stdout: OutputSink,
    stderr: OutputSink,
    stdin: InputSource,
    commands: Arc<CommandRegistry>,
    cancellation: CancellationToken,
}

impl Context {
    /// A context wired to the process's standard streams.
    pub fn stdio() -> Self {
        Self::with_streams(OutputSink::stdout(), OutputSink::stderr(), InputSource::stdin())
    }

    /// A context over explicit streams, with no prompt and no commands.
    pub fn with_streams(stdout: OutputSink, stderr: OutputSink, stdin: InputSource) -> Self {
        Self {
            prompt: None,
            stdout,
            stderr,
            stdin,
            commands: Arc::new(CommandRegistry::new()),
            cancellation: CancellationToken::new(),
        }
    }

    /// The prompt to render, falling back to [`DEFAULT_PROMPT`].
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// True if a prompt has been bound explicitly.
    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn stdout(&self) -> OutputSink {
        self.stdout.clone()
    }

    pub fn stderr(&self) -> OutputSink {
        self.stderr.clone()
    }

    pub fn stdin(&self) -> InputSource {
        self.stdin.clone()
    }

    /// Snapshot of the command registry this context resolves against.
    pub fn commands(&self) -> &Arc<CommandRegistry> {
        &self.commands
    }

    /// The process-wide cancellation signal.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Derive a context with a different prompt.
    #[must_use]
    pub fn with_prompt(&self, prompt: impl Into<Arc<str>>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..self.clone()
        }
    }

    /// Derive a context writing standard output elsewhere.
    #[must_use]
    pub fn with_stdout(&self, stdout: OutputSink) -> Self {
        Self {
            stdout,
            ..self.clone()
        }
    }

    /// Derive a context writing standard error elsewhere.
    #[must_use]
    pub fn with_stderr(&self, stderr: OutputSink) -> Self {
        Self {
            stderr,
            ..self.clone()
        }
    }

    /// Derive a context reading from a different input.
    #[must_use]
    pub fn with_stdin(&self, stdin: InputSource) -> Self {
        Self {
            stdin,
            ..self.clone()
        }
    }

    /// Derive a context resolving against a new registry snapshot.
    #[must_use]
    pub fn with_commands(&self, commands: Arc<CommandRegistry>) -> Self {
        Self {
            commands,
            ..self.clone()
        }
    }

    /// Derive a context observing a different cancellation token.
    #[must_use]
    pub fn with_cancellation(&self, cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            ..self.clone()
        }
    }
}

/// Structural equality: same prompt, and the very same stream handles,
/// registry snapshot and cancellation token.
impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.prompt == other.prompt
            && self.stdout.same_as(&other.stdout)
            && self.stderr.same_as(&other.stderr)
            && self.stdin.same_as(&other.stdin)
            && Arc::ptr_eq(&self.commands, &other.commands)
            && self.cancellation.is_cancelled() == other.cancellation.is_cancelled()
    }
}
