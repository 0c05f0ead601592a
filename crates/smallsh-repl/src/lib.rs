//! smallsh REPL — the interactive read-dispatch-report loop.
//!
//! The loop cycles through `Prompting → ReadingLine → Dispatching` until
//! input ends, reading fails, or the context's cancellation token fires.
//! Every dispatch returns a context; the loop adopts it whether or not the
//! command failed, so the next prompt reflects whatever the last command
//! changed.

pub mod banner;
pub mod cli;

use std::fmt;
use std::io::{self, Write};

use anyhow::{Context as _, Result};

use smallsh_kernel::{Context, DispatchError, Kernel, LineRead, handle};

pub use cli::Cli;

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The input stream ended.
    EndOfInput,
    /// The cancellation token fired while waiting for input.
    Cancelled,
    /// Reading input failed.
    ReadError { kind: io::ErrorKind, message: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndOfInput => write!(f, "end of input"),
            StopReason::Cancelled => write!(f, "interrupted"),
            StopReason::ReadError { message, .. } => write!(f, "read error: {message}"),
        }
    }
}

enum State {
    Prompting,
    ReadingLine,
    Dispatching(String),
    Stopped(StopReason),
}

/// REPL state: just the current context.
pub struct Repl {
    ctx: Context,
}

impl Repl {
    /// Create a REPL starting from the given context.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// The context the next line will be dispatched against.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn into_context(self) -> Context {
        self.ctx
    }

    /// Dispatch a single line and adopt the returned context.
    pub async fn process_line(&mut self, line: &str) -> Result<(), DispatchError> {
        let outcome = handle(self.ctx.clone(), line).await;
        self.ctx = outcome.ctx;
        outcome.result
    }

    /// Write the current prompt, followed by a space, to stdout.
    pub fn render_prompt(&self) -> io::Result<()> {
        let mut out = self.ctx.stdout();
        write!(out, "{} ", self.ctx.prompt())?;
        out.flush()
    }

    /// Run until input ends, reading fails, or cancellation fires.
    ///
    /// The stop reason is written to the context's stderr and returned; the
    /// process itself is left running.
    pub async fn run(&mut self) -> StopReason {
        let mut state = State::Prompting;
        loop {
            state = match state {
                State::Prompting => {
                    if let Err(e) = self.render_prompt() {
                        tracing::warn!(error = %e, "failed to write prompt");
                    }
                    State::ReadingLine
                }
                State::ReadingLine => self.read_line().await,
                State::Dispatching(line) => {
                    if let Err(e) = self.process_line(&line).await {
                        tracing::debug!(error = %e, "dispatch failed");
                        self.report(&e);
                    }
                    State::Prompting
                }
                State::Stopped(reason) => {
                    tracing::debug!(%reason, "REPL stopped");
                    if reason != StopReason::Cancelled {
                        self.report(&reason);
                    }
                    return reason;
                }
            };
        }
    }

    async fn read_line(&self) -> State {
        let cancellation = self.ctx.cancellation().clone();
        let stdin = self.ctx.stdin();

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => State::Stopped(StopReason::Cancelled),
            read = stdin.read_line() => match read {
                Ok(LineRead::Line(line)) => State::Dispatching(line),
                Ok(LineRead::Eof { partial }) => {
                    if !partial.is_empty() {
                        tracing::debug!(bytes = partial.len(), "discarding unterminated final line");
                    }
                    State::Stopped(StopReason::EndOfInput)
                }
                Err(e) => State::Stopped(StopReason::ReadError {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            },
        }
    }

    fn report(&self, message: &dyn fmt::Display) {
        if let Err(e) = writeln!(self.ctx.stderr(), "{message}") {
            tracing::warn!(error = %e, "failed to report to stderr");
        }
    }
}

/// Initialize the shell, print the banner, and run the REPL until it stops
/// or Ctrl-C is pressed.
pub async fn run(cli: Cli) -> Result<()> {
    let kernel = Kernel::new(cli.kernel_config()).context("Failed to initialize")?;
    let ctx = kernel.into_context();

    banner::print_startup(&ctx, !cli.no_banner).context("Failed to write banner")?;

    let cancellation = ctx.cancellation().clone();
    let mut repl = Repl::new(ctx);
    let mut task = tokio::spawn(async move { repl.run().await });

    tokio::select! {
        stopped = &mut task => {
            let reason = stopped.context("REPL task failed")?;
            tracing::info!(%reason, "REPL finished");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            tracing::info!("termination requested");
            cancellation.cancel();
            let reason = task.await.context("REPL task failed")?;
            tracing::debug!(%reason, "REPL finished after cancellation");
        }
    }

    Ok(())
}
