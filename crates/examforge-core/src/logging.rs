use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Counters for test generation, passed explicitly to the assembler.
///
/// All operations are atomic and lock-free; one instance may be shared by
/// concurrent generations.
#[derive(Debug, Default)]
pub struct GenerationMetrics {
    started: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    conflicts: AtomicU64,
    triplets: AtomicU64,
    shortfall_units: AtomicU64,
    quota_corrections: AtomicU64,
}

impl GenerationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_started(&self) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed generation with its triplet and shortfall totals
    pub fn record_completed(&self, triplets: u64, shortfall_units: u64) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.triplets.fetch_add(triplets, Ordering::Relaxed);
        self.shortfall_units
            .fetch_add(shortfall_units, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected attempt on an already generated session
    pub fn record_conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a quota total that had to be repaired after rounding
    pub fn record_quota_correction(&self) {
        self.quota_corrections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn conflicts(&self) -> u64 {
        self.conflicts.load(Ordering::Relaxed)
    }

    pub fn triplets(&self) -> u64 {
        self.triplets.load(Ordering::Relaxed)
    }

    pub fn shortfall_units(&self) -> u64 {
        self.shortfall_units.load(Ordering::Relaxed)
    }

    pub fn quota_corrections(&self) -> u64 {
        self.quota_corrections.load(Ordering::Relaxed)
    }
}

/// Log generation metrics at debug level.
///
/// Usage:
/// ```rust,ignore
/// let metrics = GenerationMetrics::new();
/// // ... run generations ...
/// log_generation_metrics!(&metrics, "generate");
/// ```
#[macro_export]
macro_rules! log_generation_metrics {
    ($metrics:expr, $name:expr) => {
        tracing::debug!(
            operation = $name,
            started = $metrics.started(),
            completed = $metrics.completed(),
            failed = $metrics.failed(),
            conflicts = $metrics.conflicts(),
            triplets = $metrics.triplets(),
            shortfall_units = $metrics.shortfall_units(),
            quota_corrections = $metrics.quota_corrections(),
            "generation_metrics"
        );
    };
}

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "allocate");
/// // Or with additional fields:
/// trace_time!(start, "select", competency = id.0);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "examforge=debug,examforge_core=debug",
        (false, None) => "examforge=warn,examforge_core=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins, then EXAMFORGE_LOG, then the CLI-derived level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("EXAMFORGE_LOG"))
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level.to_string()
            } else {
                format!("examforge={},examforge_core={}", level, level)
            })
        });

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
