//! Store configuration for examforge
//!
//! Configuration is stored in `<store>/config.toml`. Missing files and missing
//! keys fall back to defaults.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{ExamError, Result};

pub use types::{
    GenerationConfig, StorageConfig, StoreConfig, ZeroWeightPolicy, DEFAULT_TRIPLET_TARGET,
    MAX_TRIPLET_TARGET, QUESTIONS_PER_TRIPLET, STORE_FORMAT_VERSION,
};

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ExamError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.generation.triplet_target == 0 {
            crate::bail_invalid!("generation.triplet_target must be at least 1");
        }
        if self.generation.triplet_target > MAX_TRIPLET_TARGET {
            crate::bail_invalid!(
                "generation.triplet_target {} exceeds the maximum of {}",
                self.generation.triplet_target,
                MAX_TRIPLET_TARGET
            );
        }
        if self.version > STORE_FORMAT_VERSION {
            return Err(ExamError::UsageError(format!(
                "store format version {} is newer than supported version {}",
                self.version, STORE_FORMAT_VERSION
            )));
        }
        Ok(())
    }
}
