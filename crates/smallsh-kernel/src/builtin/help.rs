//! help — List available commands.

use std::io::Write;

use async_trait::async_trait;

use crate::command::{Command, CommandError, Outcome};
use crate::context::Context;

/// Help command: lists the commands of the context's registry snapshot.
pub struct Help;

#[async_trait]
impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn summary(&self) -> &str {
        "List available commands, or describe one: help [NAME]"
    }

    async fn exec(&self, ctx: Context, args: Vec<String>) -> Outcome {
        let mut out = ctx.stdout();
        let commands = ctx.commands().clone();

        let written = match args.get(1..).unwrap_or_default() {
            [] => {
                let width = commands.names().iter().map(|n| n.len()).max().unwrap_or(0);
                commands.iter().try_for_each(|(name, command)| {
                    writeln!(out, "  {name:<width$}  {}", command.summary())
                })
            }
            [name] => match commands.get(name) {
                Some(command) => writeln!(out, "{name} — {}", command.summary()),
                None => {
                    let usage = format!("no such command: {name}");
                    return Outcome::err(ctx, CommandError::Usage(usage));
                }
            },
            _ => return Outcome::err(ctx, CommandError::Usage("usage: help [NAME]".into())),
        };

        let written: Result<(), CommandError> = written.map_err(Into::into);
        (ctx, written).into()
    }
}
