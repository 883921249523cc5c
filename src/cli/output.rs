pub use examforge_core::format::OutputFormat;
use examforge_core::error::ExamError;

/// clap value parser for `--format`, backed by `OutputFormat::from_str`
pub fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: ExamError| e.to_string())
}
