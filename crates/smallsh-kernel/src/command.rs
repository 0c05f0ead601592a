//! The Command contract.
//!
//! A command receives the current [`Context`] and the full token vector of
//! the line that selected it (`args[0]` is the command's own name) and
//! returns the context the next command should observe, together with its
//! own success or failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::context::Context;

/// A command's own failure. Resolution failures never use this type.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Bad arguments.
    #[error("{0}")]
    Usage(String),
    /// Writing to a sink or talking to a child process failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An external program exited unsuccessfully.
    #[error("exited with status {code}")]
    Exit { code: i32 },
    /// Anything else the command wants to report.
    #[error("{0}")]
    Failed(String),
}

/// The context produced by an invocation plus its result.
///
/// The context is returned even on failure, so state changes made before
/// the failure are kept.
#[derive(Debug)]
pub struct Outcome<E = CommandError> {
    pub ctx: Context,
    pub result: Result<(), E>,
}

impl<E> Outcome<E> {
    /// Success with the given context.
    pub fn ok(ctx: Context) -> Self {
        Self { ctx, result: Ok(()) }
    }

    /// Failure alongside the context to keep.
    pub fn err(ctx: Context, error: impl Into<E>) -> Self {
        Self {
            ctx,
            result: Err(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_parts(self) -> (Context, Result<(), E>) {
        (self.ctx, self.result)
    }
}

/// Build an outcome from a context and any fallible step, e.g. a write.
impl<E> From<(Context, Result<(), E>)> for Outcome<E> {
    fn from((ctx, result): (Context, Result<(), E>)) -> Self {
        Self { ctx, result }
    }
}

/// An invocable, named unit of shell behavior.
#[async_trait]
pub trait Command: Send + Sync {
    /// Name the command is registered under.
    fn name(&self) -> &str;

    /// One-line description shown by `help`.
    fn summary(&self) -> &str {
        ""
    }

    /// Run the command.
    ///
    /// Output goes through `ctx.stdout()` / `ctx.stderr()`, never the
    /// process streams.
    async fn exec(&self, ctx: Context, args: Vec<String>) -> Outcome;
}
