//! Integration tests for the smallsh REPL.
//!
//! These tests feed scripts through a kernel-initialized REPL over captured
//! streams and verify what the user would see.

use async_trait::async_trait;

use smallsh_kernel::{
    BuiltinProvider, CaptureBuffer, Command, CommandError, CommandRegistry, Context,
    DEFAULT_PROMPT, InputSource, Kernel, KernelConfig, Outcome, OutputSink, RegistryProvider,
    StaticProvider,
};
use smallsh_repl::{Repl, StopReason};

struct Session {
    repl: Repl,
    stdout: CaptureBuffer,
    stderr: CaptureBuffer,
}

fn session_with(script: &str, providers: &[Box<dyn RegistryProvider>]) -> Session {
    let (stdout, out) = OutputSink::capture();
    let (stderr, err) = OutputSink::capture();
    let ctx = Context::with_streams(stdout, stderr, InputSource::from_text(script));
    let kernel = Kernel::with_providers(KernelConfig::default(), ctx, providers)
        .expect("Failed to create kernel");

    Session {
        repl: Repl::new(kernel.into_context()),
        stdout: out,
        stderr: err,
    }
}

/// A session with the builtin commands.
fn session(script: &str) -> Session {
    let providers: Vec<Box<dyn RegistryProvider>> = vec![Box::new(BuiltinProvider)];
    session_with(script, &providers)
}

/// Sets the prompt to `"$ "`, then fails.
struct SetPromptThenFail;

#[async_trait]
impl Command for SetPromptThenFail {
    fn name(&self) -> &str {
        "setprompt"
    }

    async fn exec(&self, ctx: Context, _args: Vec<String>) -> Outcome {
        Outcome::err(ctx.with_prompt("$ "), CommandError::Failed("partial".into()))
    }
}

// ============================================================================
// Loop behavior
// ============================================================================

#[tokio::test]
async fn echo_prints_and_loop_stops_at_end_of_input() {
    let mut s = session("  echo hello world  \n");
    let reason = s.repl.run().await;

    assert_eq!(reason, StopReason::EndOfInput);
    assert_eq!(s.stdout.contents(), "/> hello world\n/> ");
    assert_eq!(s.stderr.contents(), "end of input\n");
}

#[tokio::test]
async fn errors_are_reported_and_loop_continues() {
    let mut s = session("nope\necho still here\n");
    s.repl.run().await;

    assert_eq!(s.stdout.contents(), "/> /> still here\n/> ");
    assert_eq!(s.stderr.contents(), "command not found: nope\nend of input\n");
}

#[tokio::test]
async fn blank_lines_just_prompt_again() {
    let mut s = session("\n   \n");
    s.repl.run().await;

    assert_eq!(s.stdout.contents(), "/> /> /> ");
    assert_eq!(s.stderr.contents(), "end of input\n");
}

#[tokio::test]
async fn prompt_command_changes_next_prompt() {
    let mut s = session("prompt $\necho hi\nprompt\n");
    s.repl.run().await;

    assert_eq!(s.stdout.contents(), "/> $ hi\n$ /> ");
    assert_eq!(s.repl.context().prompt(), DEFAULT_PROMPT);
}

#[tokio::test]
async fn context_from_failing_command_is_kept() {
    let mut registry = CommandRegistry::new();
    registry.register(SetPromptThenFail).unwrap();
    let providers: Vec<Box<dyn RegistryProvider>> = vec![
        Box::new(BuiltinProvider),
        Box::new(StaticProvider::new(registry)),
    ];

    let mut s = session_with("setprompt\necho after\n", &providers);
    s.repl.run().await;

    assert_eq!(s.stdout.contents(), "/> $  after\n$  ");
    assert_eq!(s.stderr.contents(), "setprompt: partial\nend of input\n");
}

#[tokio::test]
async fn unterminated_final_line_is_not_dispatched() {
    let mut s = session("echo one\necho two");
    let reason = s.repl.run().await;

    assert_eq!(reason, StopReason::EndOfInput);
    assert_eq!(s.stdout.contents(), "/> one\n/> ");
}

#[tokio::test]
async fn invalid_utf8_line_does_not_stop_the_loop() {
    let (stdout, out) = OutputSink::capture();
    let (stderr, err) = OutputSink::capture();
    let input = InputSource::new(std::io::Cursor::new(
        b"echo caf\xe9\necho still alive\n".to_vec(),
    ));
    let ctx = Context::with_streams(stdout, stderr, input);
    let kernel =
        Kernel::with_context(KernelConfig::default(), ctx).expect("Failed to create kernel");
    let mut repl = Repl::new(kernel.into_context());

    let reason = repl.run().await;
    assert_eq!(reason, StopReason::EndOfInput);
    assert_eq!(out.contents(), "/> caf\u{FFFD}\n/> still alive\n/> ");
    assert_eq!(err.contents(), "end of input\n");
}

#[tokio::test]
async fn cancellation_stops_a_waiting_loop() {
    let (stdout, _) = OutputSink::capture();
    let (stderr, err) = OutputSink::capture();
    // A reader that never produces data.
    let (_writer, reader) = tokio::io::duplex(64);
    let input = InputSource::new(tokio::io::BufReader::new(reader));
    let ctx = Context::with_streams(stdout, stderr, input);
    let cancellation = ctx.cancellation().clone();

    let mut repl = Repl::new(ctx);
    let task = tokio::spawn(async move { repl.run().await });
    cancellation.cancel();

    assert_eq!(task.await.unwrap(), StopReason::Cancelled);
    assert_eq!(err.contents(), "");
}

// ============================================================================
// Builtins through the loop
// ============================================================================

#[tokio::test]
async fn help_lists_loaded_commands() {
    let mut s = session("help\n");
    s.repl.run().await;

    let out = s.stdout.contents();
    for name in ["echo", "help", "prompt"] {
        assert!(out.contains(name), "missing {name} in {out}");
    }
}

#[tokio::test]
async fn process_line_returns_errors_without_losing_state() {
    let mut s = session("");
    s.repl.process_line("prompt >>").await.unwrap();
    let err = s.repl.process_line("help nope").await.unwrap_err();

    assert_eq!(err.to_string(), "help: no such command: nope");
    assert_eq!(s.repl.context().prompt(), ">>");
}

#[tokio::test]
async fn empty_registry_has_no_commands() {
    let empty: Vec<Box<dyn RegistryProvider>> = vec![];
    let mut s = session_with("help\n", &empty);
    s.repl.run().await;

    assert!(s.repl.context().commands().is_empty());
    assert_eq!(s.stderr.contents(), "command not found: help\nend of input\n");
}

// ============================================================================
// Plugins
// ============================================================================

#[cfg(unix)]
#[tokio::test]
async fn plugin_directory_commands_run_through_the_loop() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shout");
    std::fs::write(&path, "#!/bin/sh\necho \"$@\" | tr a-z A-Z\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let (stdout, out) = OutputSink::capture();
    let (stderr, _) = OutputSink::capture();
    let ctx = Context::with_streams(stdout, stderr, InputSource::from_text("shout hi there\n"));
    let config = KernelConfig {
        plugins_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let kernel = Kernel::with_context(config, ctx).unwrap();
    assert!(kernel.commands().contains("shout"));

    let mut repl = Repl::new(kernel.into_context());
    repl.run().await;
    assert_eq!(out.contents(), "/> HI THERE\n/> ");
}
