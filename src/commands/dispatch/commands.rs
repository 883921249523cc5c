//! Subcommand routing

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{allocate, doctor, generate, init, session, show};
use examforge_core::error::Result;
use examforge_core::store::Store;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let cli = ctx.cli;
        let result = match self {
            Commands::Init => init::execute(cli, ctx.root),
            Commands::Session { command } => {
                with_store(ctx, |store| session::execute(cli, store, command))
            }
            Commands::Allocate(args) => with_store(ctx, |store| allocate::execute(cli, store, args)),
            Commands::Generate(args) => with_store(ctx, |store| generate::execute(cli, store, args)),
            Commands::Show { session } => with_store(ctx, |store| show::execute(cli, store, *session)),
            Commands::Doctor => with_store(ctx, |store| doctor::execute(cli, store)),
        };

        tracing::debug!(elapsed = ?ctx.start.elapsed(), "execute_command");
        result
    }
}

fn with_store(ctx: &CommandContext, f: impl FnOnce(&Store) -> Result<()>) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    f(&store)
}
