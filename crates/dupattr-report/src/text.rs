//! Human-readable report: one block per finding, then a summary line.

use dupattr_lint::{DuplicateFinding, ScanResult, Warning};

const SEPARATOR: &str = "--------------------";

pub fn render(result: &ScanResult<'_>, show_warnings: bool) -> String {
    let mut out = String::new();

    for finding in &result.findings {
        write_finding(&mut out, finding);
    }
    if show_warnings {
        for warning in &result.warnings {
            write_warning(&mut out, warning);
        }
    }
    out.push_str(&summary(result, show_warnings));
    out
}

fn write_finding(out: &mut String, finding: &DuplicateFinding<'_>) {
    out.push_str(&format!(
        "error: duplicate attribute `{}` at {}:{} (first declared at {}:{})\n",
        finding.name,
        finding.duplicate.line,
        finding.duplicate.column,
        finding.first.line,
        finding.first.column
    ));
    out.push_str(finding.tag.text);
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
}

fn write_warning(out: &mut String, warning: &Warning) {
    out.push_str(&format!(
        "warning: {} at {}:{}\n",
        warning.message, warning.span.line, warning.span.column
    ));
}

/// Final line, e.g. `Found 2 duplicate attributes.`
pub fn summary(result: &ScanResult<'_>, show_warnings: bool) -> String {
    let head = match result.findings.len() {
        0 => "No duplicate attributes found".to_string(),
        n => format!("Found {n} duplicate {}", plural(n, "attribute")),
    };
    let warnings = result.warnings.len();
    if show_warnings && warnings > 0 {
        format!("{head} ({warnings} {}).", plural(warnings, "warning"))
    } else {
        format!("{head}.")
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
