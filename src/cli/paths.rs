//! Path resolution for store discovery

use std::env;
use std::path::{Path, PathBuf};

/// Root directory for store discovery: `--root`, else the current directory,
/// else "."
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// `--store` resolved against the root when relative
pub fn resolve_store_path(root: &Path, store: &Path) -> PathBuf {
    if store.is_absolute() {
        store.to_path_buf()
    } else {
        root.join(store)
    }
}
