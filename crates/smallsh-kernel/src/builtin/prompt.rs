//! prompt — Change the shell prompt.

use async_trait::async_trait;

use crate::command::{Command, Outcome};
use crate::context::{Context, DEFAULT_PROMPT};

/// Prompt command: returns a context carrying a new prompt.
///
/// `prompt` with no arguments restores the default.
pub struct Prompt;

#[async_trait]
impl Command for Prompt {
    fn name(&self) -> &str {
        "prompt"
    }

    fn summary(&self) -> &str {
        "Set the prompt (no arguments restores the default)"
    }

    async fn exec(&self, ctx: Context, args: Vec<String>) -> Outcome {
        let text = match args.get(1..) {
            Some(rest) if !rest.is_empty() => rest.join(" "),
            _ => DEFAULT_PROMPT.to_string(),
        };
        tracing::debug!(prompt = %text, "prompt changed");
        Outcome::ok(ctx.with_prompt(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::testing::{args, capture_ctx};
    use crate::registry::CommandRegistry;

    #[tokio::test]
    async fn test_prompt_sets_joined_text() {
        let (ctx, _, _) = capture_ctx(CommandRegistry::new());
        let outcome = Prompt.exec(ctx, args(&["prompt", "my", "shell>"])).await;
        assert!(outcome.is_ok());
        assert_eq!(outcome.ctx.prompt(), "my shell>");
    }

    #[tokio::test]
    async fn test_prompt_without_args_restores_default() {
        let (ctx, _, _) = capture_ctx(CommandRegistry::new());
        let ctx = ctx.with_prompt("$");
        let outcome = Prompt.exec(ctx, args(&["prompt"])).await;
        assert_eq!(outcome.ctx.prompt(), DEFAULT_PROMPT);
    }
}
