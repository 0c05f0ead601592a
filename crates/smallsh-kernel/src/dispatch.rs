//! The dispatcher: one raw line in, one [`Outcome`] out.

use thiserror::Error;

use crate::command::{CommandError, Outcome};
use crate::context::Context;

/// Why a line could not be carried out.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The line had content but produced no tokens.
    #[error("unable to parse command line: {line}")]
    Parse { line: String },
    /// The first token names no registered command.
    #[error("command not found: {name}")]
    NotFound { name: String },
    /// The command ran and reported its own failure.
    #[error("{name}: {source}")]
    Execution {
        name: String,
        #[source]
        source: CommandError,
    },
}

impl DispatchError {
    /// Name of the command involved, if resolution got that far.
    pub fn command_name(&self) -> Option<&str> {
        match self {
            DispatchError::Parse { .. } => None,
            DispatchError::NotFound { name } | DispatchError::Execution { name, .. } => Some(name),
        }
    }
}

/// Split a line into maximal runs of non-whitespace.
///
/// No quoting and no escaping: `echo "a b"` yields `echo`, `"a`, `b"`.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Resolve and run one line against the current context.
///
/// Blank lines are a silent no-op. Resolution failures hand back `ctx`
/// untouched; otherwise the command's returned context is passed through
/// verbatim, even when it failed.
pub async fn handle(ctx: Context, raw_line: &str) -> Outcome<DispatchError> {
    let line = raw_line.trim();
    if line.is_empty() {
        return Outcome::ok(ctx);
    }

    let args = tokenize(line);
    let Some(name) = args.first().cloned() else {
        return Outcome::err(
            ctx,
            DispatchError::Parse {
                line: raw_line.to_string(),
            },
        );
    };

    let Some(command) = ctx.commands().get(&name) else {
        tracing::debug!(command = %name, "command not found");
        return Outcome::err(ctx, DispatchError::NotFound { name });
    };

    tracing::debug!(command = %name, argc = args.len(), "dispatching");
    let Outcome { ctx, result } = command.exec(ctx, args).await;
    let result = result.map_err(|source| DispatchError::Execution { name, source });
    Outcome { ctx, result }
}
