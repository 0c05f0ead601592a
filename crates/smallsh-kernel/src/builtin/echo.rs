//! echo — Print arguments to stdout.

use std::io::Write;

use async_trait::async_trait;

use crate::command::{Command, CommandError, Outcome};
use crate::context::Context;

/// Echo command: prints its arguments separated by single spaces.
pub struct Echo;

#[async_trait]
impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn summary(&self) -> &str {
        "Print arguments to standard output"
    }

    async fn exec(&self, ctx: Context, args: Vec<String>) -> Outcome {
        let line = args.get(1..).unwrap_or_default().join(" ");
        let written: Result<(), CommandError> =
            writeln!(ctx.stdout(), "{line}").map_err(Into::into);
        (ctx, written).into()
    }
}
