//! dupattr Report
//!
//! Renders a [`ScanResult`] for people (text) or tools (JSON).
//!
//! ```text
//! ScanResult → render(format) → String
//! ```

pub mod json;
pub mod text;

use dupattr_lint::ScanResult;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Report rendering error.
#[derive(Debug, thiserror::Error)]
#[error("Report error: {0}")]
pub struct ReportError(#[from] serde_json::Error);

/// Render `result` in the requested format. Warnings are included unless
/// `show_warnings` is false.
pub fn render(
    result: &ScanResult<'_>,
    format: Format,
    show_warnings: bool,
) -> Result<String, ReportError> {
    match format {
        Format::Text => Ok(text::render(result, show_warnings)),
        Format::Json => json::render(result, show_warnings),
    }
}
