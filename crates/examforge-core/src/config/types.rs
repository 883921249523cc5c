//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Default number of triplets per test (60 questions)
pub const DEFAULT_TRIPLET_TARGET: u32 = 20;

/// Questions per triplet (junior, middle, senior)
pub const QUESTIONS_PER_TRIPLET: u32 = 3;

/// Upper bound on a test's triplet target, from config or `--triplets`
pub const MAX_TRIPLET_TARGET: u32 = 10_000;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Test generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Database settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// What to do when every competency weight of a specialization is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroWeightPolicy {
    /// Split the target evenly, remainder to the first competencies
    #[default]
    EqualSplit,
    /// Treat all-zero weights as a configuration error
    Reject,
}

/// Settings for test generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Triplets per test; each triplet is three questions
    #[serde(default = "default_triplet_target")]
    pub triplet_target: u32,

    #[serde(default)]
    pub zero_weight_policy: ZeroWeightPolicy,
}

impl GenerationConfig {
    /// Total questions in a fully generated test
    pub fn total_questions(&self) -> u64 {
        u64::from(self.triplet_target) * u64::from(QUESTIONS_PER_TRIPLET)
    }
}

/// Settings for the SQLite database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// How long a statement waits on a locked database before failing
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_triplet_target() -> u32 {
    DEFAULT_TRIPLET_TARGET
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            version: STORE_FORMAT_VERSION,
            generation: GenerationConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            triplet_target: default_triplet_target(),
            zero_weight_policy: ZeroWeightPolicy::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
