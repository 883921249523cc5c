//! Store management for examforge
//!
//! A store is a directory (default `.examforge/`) holding `config.toml` and
//! the SQLite database with the question catalog, sessions and assignments.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::{ExamError, Result};
use paths::{CONFIG_FILE, DATABASE_FILE, DEFAULT_STORE_DIR};

#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    config: StoreConfig,
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(ExamError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config = StoreConfig::load_or_default(&path.join(CONFIG_FILE))?;
        let db = Database::open(&path.join(DATABASE_FILE), &config.storage)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Create a store under `project_root`, or reopen the one already there
    pub fn init(project_root: &Path) -> Result<Self> {
        Self::init_at(&project_root.join(DEFAULT_STORE_DIR))
    }

    /// Create a store at an explicit store root path
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root).map_err(|e| {
            ExamError::FailedOperation {
                operation: format!("create store directory {}", store_root.display()),
                reason: e.to_string(),
            }
        })?;

        let config_path = store_root.join(CONFIG_FILE);
        if !config_path.exists() {
            StoreConfig::default().save(&config_path)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Self::open(store_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
