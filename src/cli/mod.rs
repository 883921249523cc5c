//! CLI argument parsing for examforge
//!
//! Global flags: --root, --store, --format, --quiet, --verbose, --log-level,
//! --log-json

pub mod format;
pub mod output;
pub mod paths;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Args, Parser, Subcommand};
use examforge_core::error::ExamError;
use std::path::PathBuf;

pub use output::OutputFormat;
use output::parse_output_format;

/// examforge - weighted competency test generator
#[derive(Parser, Debug)]
#[command(name = "examforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `debug` or `examforge_core=trace`
    #[arg(long, global = true, env = "EXAMFORGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new examforge store
    Init,

    /// Manage test sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Preview competency quotas for a specialization without writing anything
    Allocate(AllocateArgs),

    /// Generate the question set for a session
    Generate(GenerateArgs),

    /// Show the questions assigned to a session
    Show {
        /// Session id
        #[arg(long)]
        session: i64,
    },

    /// Report catalog coverage for every specialization
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Create a session in `not_started` state
    Create {
        /// User taking the test
        #[arg(long)]
        user: i64,

        /// Specialization id
        #[arg(long)]
        specialization: i64,

        /// Maximum score recorded on the session
        #[arg(long)]
        max_score: Option<i64>,
    },
}

/// Options shared by commands that draw randomness
#[derive(Args, Debug, Clone, Default)]
pub struct DrawArgs {
    /// Triplets to generate (defaults to generation.triplet_target)
    #[arg(long)]
    pub triplets: Option<u32>,

    /// Seed for reproducible quotas and selection
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct AllocateArgs {
    /// Specialization id
    #[arg(long)]
    pub specialization: i64,

    #[command(flatten)]
    pub draw: DrawArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Session id
    #[arg(long)]
    pub session: i64,

    #[command(flatten)]
    pub draw: DrawArgs,
}

/// Map a clap parse failure onto the examforge error set for the JSON envelope
pub fn parse_error(err: &clap::Error) -> ExamError {
    match err.kind() {
        ErrorKind::ValueValidation if names_format_arg(err) => {
            match err.get(ContextKind::InvalidValue) {
                Some(ContextValue::String(value)) => ExamError::UnknownFormat(value.clone()),
                _ => ExamError::UsageError(err.to_string()),
            }
        }
        // ArgumentConflict also covers a repeated `--format`
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => ExamError::UsageError(err.to_string()),
        _ => ExamError::Other(err.to_string()),
    }
}

fn names_format_arg(err: &clap::Error) -> bool {
    matches!(
        err.get(ContextKind::InvalidArg),
        Some(ContextValue::String(arg)) if arg.starts_with("--format")
    )
}
