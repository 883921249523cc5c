//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::paths::resolve_store_path;
use crate::cli::Cli;
use examforge_core::error::Result;
use examforge_core::store::Store;

/// Open `--store` if given, otherwise discover a store from the root
pub fn discover_or_open_store(cli: &Cli, root: &PathBuf) -> Result<Store> {
    match &cli.store {
        Some(path) => Store::open(&resolve_store_path(root, path)),
        None => Store::discover(root),
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    pub fn discover_or_open_store(&self) -> Result<Store> {
        let store = discover_or_open_store(self.cli, self.root)?;
        tracing::debug!(
            elapsed = ?self.start.elapsed(),
            store = %store.root().display(),
            "open_store"
        );
        Ok(store)
    }
}

pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Runs when no subcommand is given
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("examforge {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Weighted competency test generator.");
        println!();
        println!("Run `examforge --help` for usage information.");
        Ok(())
    }
}
