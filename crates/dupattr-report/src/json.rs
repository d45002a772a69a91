//! Machine-readable report.

use dupattr_lint::{DuplicateFinding, ScanResult, Warning};
use serde::Serialize;

use crate::ReportError;

#[derive(Serialize)]
struct JsonReport<'r, 'a> {
    has_duplicates: bool,
    tags_scanned: usize,
    findings: &'r [DuplicateFinding<'a>],
    warnings: &'r [Warning],
}

pub fn render(result: &ScanResult<'_>, show_warnings: bool) -> Result<String, ReportError> {
    let report = JsonReport {
        has_duplicates: result.has_duplicates(),
        tags_scanned: result.tags_scanned,
        findings: &result.findings,
        warnings: if show_warnings { &result.warnings[..] } else { &[] },
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
