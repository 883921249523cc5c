//! Error types and exit codes for examforge
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including persistence failures)
//! - 2: Usage error (bad flags/args, invalid weights or targets)
//! - 3: Data/store error (missing store, missing data, generation conflicts)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{SessionId, SpecializationId};

/// Exit codes for the examforge binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, missing catalog data, conflicts (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for ExamError {
    fn from(err: rusqlite::Error) -> Self {
        ExamError::Other(err.to_string())
    }
}

/// Errors that can occur during allocation, assembly and store operations
#[derive(Error, Debug)]
pub enum ExamError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("no competencies found for specialization {specialization}; import competency data first")]
    NoCompetencies { specialization: SpecializationId },

    #[error("no topic with a complete junior/middle/senior triplet for specialization {specialization}")]
    NoEligibleTopics { specialization: SpecializationId },

    #[error("session {session} already has generated questions")]
    AlreadyGenerated { session: SessionId },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("failed to persist assignments for session {session}: {reason}")]
    PersistenceFailure { session: SessionId, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl ExamError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        ExamError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed transaction operation
    pub fn transaction(operation: &str, error: impl std::fmt::Display) -> Self {
        ExamError::FailedOperation {
            operation: format!("{} transaction", operation),
            reason: error.to_string(),
        }
    }

    /// Create an error for a persistence failure scoped to a session
    pub fn persistence(session: SessionId, error: impl std::fmt::Display) -> Self {
        ExamError::PersistenceFailure {
            session,
            reason: error.to_string(),
        }
    }

    /// Create an error for invalid caller input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ExamError::InvalidInput(message.into())
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        ExamError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ExamError::UnknownFormat(_)
            | ExamError::UsageError(_)
            | ExamError::InvalidInput(_) => ExitCode::Usage,

            ExamError::StoreNotFound { .. }
            | ExamError::NoCompetencies { .. }
            | ExamError::NoEligibleTopics { .. }
            | ExamError::AlreadyGenerated { .. }
            | ExamError::NotFound { .. } => ExitCode::Data,

            ExamError::PersistenceFailure { .. }
            | ExamError::Io(_)
            | ExamError::Json(_)
            | ExamError::Toml(_)
            | ExamError::FailedOperation { .. }
            | ExamError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ExamError::UnknownFormat(_) => "unknown_format",
            ExamError::UsageError(_) => "usage_error",
            ExamError::InvalidInput(_) => "invalid_input",
            ExamError::StoreNotFound { .. } => "store_not_found",
            ExamError::NoCompetencies { .. } => "no_competencies",
            ExamError::NoEligibleTopics { .. } => "no_eligible_topics",
            ExamError::AlreadyGenerated { .. } => "already_generated",
            ExamError::NotFound { .. } => "not_found",
            ExamError::PersistenceFailure { .. } => "persistence_failure",
            ExamError::Io(_) => "io_error",
            ExamError::Json(_) => "json_error",
            ExamError::Toml(_) => "toml_error",
            ExamError::FailedOperation { .. } => "failed_operation",
            ExamError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for examforge operations
pub type Result<T> = std::result::Result<T, ExamError>;
