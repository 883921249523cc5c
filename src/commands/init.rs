//! `examforge init` - create a store
//!
//! Idempotent: an existing store keeps its config and data.

use std::path::Path;

use crate::cli::paths::resolve_store_path;
use crate::cli::Cli;
use crate::commands::helpers::print_json;
use crate::output_by_format_result;
use examforge_core::error::Result;
use examforge_core::store::Store;

pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let store = match cli.store.as_ref() {
        Some(path) => Store::init_at(&resolve_store_path(root, path))?,
        None => Store::init(root)?,
    };
    let schema_version = store.db().get_schema_version()?;

    output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "status": "ok",
                "store": store.root().display().to_string(),
                "schema_version": schema_version,
                "message": "Store initialized"
            }))
        },
        human => {
            if !cli.quiet {
                println!(
                    "Initialized examforge store at {} (schema v{})",
                    store.root().display(),
                    schema_version
                );
            }
        }
    )
}
