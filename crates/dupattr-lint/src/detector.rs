//! Duplicate attribute detection.
//!
//! Drives the tag extractor over the whole source, tokenizes each tag's
//! attributes, and records every name seen more than once on the same tag.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use dupattr_lexer::{AttributeEvent, AttributeTokenizer, LineIndex, TagExtractor, TagSpan};

use crate::result::{DuplicateFinding, ScanResult, Warning, WarningKind};

/// Findings and warnings for a single tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCheck<'a> {
    pub findings: Vec<DuplicateFinding<'a>>,
    pub warnings: Vec<Warning>,
}

/// Entry point for scanning a whole source text.
pub struct Linter;

impl Linter {
    /// Scan `source` and collect every duplicate attribute.
    ///
    /// A malformed tag stops tag extraction; it is reported as a warning
    /// alongside the findings gathered up to that point.
    pub fn scan(source: &str) -> ScanResult<'_> {
        let mut result = ScanResult::default();
        let mut tags = TagExtractor::new(source);

        while let Some(item) = tags.next() {
            match item {
                Ok(tag) => {
                    result.tags_scanned += 1;
                    let check = check_tag(&tag, tags.line_index());
                    result.findings.extend(check.findings);
                    result.warnings.extend(check.warnings);
                }
                Err(e) => {
                    log::debug!(target: "dupattr::lint", "stopping scan: {e}");
                    result.warnings.push(Warning::from(e));
                }
            }
        }

        log::debug!(
            target: "dupattr::lint",
            "scanned {} tags: {} duplicates, {} warnings",
            result.tags_scanned,
            result.findings.len(),
            result.warnings.len()
        );
        result
    }
}

/// Check one tag. The first occurrence of each name is remembered; every
/// later occurrence on the same tag is a finding. Names compare exactly, so
/// `id` and `ID` are different attributes.
pub fn check_tag<'a>(tag: &TagSpan<'a>, lines: &LineIndex<'_>) -> TagCheck<'a> {
    let mut check = TagCheck::default();
    if tag.is_closing() {
        return check;
    }

    let mut seen: HashMap<&'a str, usize> = HashMap::new();
    for event in AttributeTokenizer::new(tag) {
        match event {
            AttributeEvent::Attribute(token) => match seen.entry(token.name) {
                Entry::Vacant(entry) => {
                    entry.insert(token.offset);
                }
                Entry::Occupied(entry) => {
                    let first = *entry.get();
                    let len = token.name.len();
                    log::trace!(
                        target: "dupattr::lint",
                        "duplicate `{}` on `<{}>` at {}",
                        token.name,
                        tag.name,
                        token.offset
                    );
                    check.findings.push(DuplicateFinding {
                        tag: *tag,
                        name: token.name,
                        first: lines.span(first, first + len),
                        duplicate: lines.span(token.offset, token.offset + len),
                    });
                }
            },
            AttributeEvent::Malformed { offset, found } => {
                check.warnings.push(Warning {
                    kind: WarningKind::MalformedAttribute,
                    message: format!(
                        "unexpected character `{found}` in attributes of `<{}>`",
                        tag.name
                    ),
                    span: lines.span(offset, offset + found.len_utf8()),
                });
            }
        }
    }
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupattr_lexer::Span;
    use pretty_assertions::assert_eq;

    /// Helper: duplicated names, in report order.
    fn duplicates(source: &str) -> Vec<&str> {
        Linter::scan(source)
            .findings
            .into_iter()
            .map(|f| f.name)
            .collect()
    }

    // =========================================================================
    // No findings
    // =========================================================================

    #[test]
    fn test_empty_source() {
        let result = Linter::scan("");
        assert!(!result.has_duplicates());
        assert!(result.findings.is_empty());
        assert_eq!(result.tags_scanned, 0);
    }

    #[test]
    fn test_text_without_tags() {
        let result = Linter::scan("const a = b < c && d > e;");
        assert!(!result.has_duplicates());
        assert_eq!(result.tags_scanned, 0);
    }

    #[test]
    fn test_unique_attributes() {
        let result = Linter::scan(r#"<Foo x="1" y="2" />"#);
        assert!(result.is_clean());
        assert_eq!(result.tags_scanned, 1);
    }

    #[test]
    fn test_case_sensitive_names() {
        assert!(duplicates(r#"<div id="a" ID="b">"#).is_empty());
    }

    #[test]
    fn test_same_name_on_different_tags() {
        let result = Linter::scan(r#"<a id="1"></a><b id="2"></b>"#);
        assert!(!result.has_duplicates());
        assert_eq!(result.tags_scanned, 4);
    }

    #[test]
    fn test_quoted_gt_does_not_split() {
        assert!(duplicates(r#"<a a="x>y" b>"#).is_empty());
    }

    #[test]
    fn test_value_text_is_not_an_attribute() {
        assert!(duplicates(r#"<a title="title=x" href="href">"#).is_empty());
    }

    #[test]
    fn test_commented_out_markup() {
        assert!(duplicates("<!-- <a x x> -->\n{/* <b y y /> */}").is_empty());
    }

    // =========================================================================
    // Findings
    // =========================================================================

    #[test]
    fn test_repeated_boolean_attribute() {
        let result = Linter::scan("<x a b a>");
        assert_eq!(result.findings.len(), 1);
        let finding = &result.findings[0];
        assert_eq!(finding.name, "a");
        assert_eq!(finding.first, Span::new(3, 4, 1, 4));
        assert_eq!(finding.duplicate, Span::new(7, 8, 1, 8));
        assert_eq!(finding.tag.text, "<x a b a>");
    }

    #[test]
    fn test_repeated_valued_attribute() {
        let result = Linter::scan(r#"<Foo x="1" y="2" x="3" />"#);
        assert!(result.has_duplicates());
        assert_eq!(duplicates(r#"<Foo x="1" y="2" x="3" />"#), vec!["x"]);
        assert_eq!(result.findings[0].tag.text, r#"<Foo x="1" y="2" x="3" />"#);
    }

    #[test]
    fn test_nested_brace_value_then_duplicate() {
        assert_eq!(duplicates("<x data-x={ {nested:1} } data-x>"), vec!["data-x"]);
    }

    #[test]
    fn test_each_repeat_is_a_finding() {
        let result = Linter::scan("<x a a a>");
        assert_eq!(result.findings.len(), 2);
        assert!(result.findings.iter().all(|f| f.first.start == 3));
        assert_eq!(result.findings[0].duplicate.start, 5);
        assert_eq!(result.findings[1].duplicate.start, 7);
    }

    #[test]
    fn test_findings_across_tags_in_source_order() {
        let source = "<a x x></a>\n<b y z y z />";
        assert_eq!(duplicates(source), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_multiline_tag_positions() {
        let source = "<input\n  type=\"text\"\n  className=\"a\"\n  type=\"number\"\n/>";
        let result = Linter::scan(source);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].name, "type");
        assert_eq!(
            (result.findings[0].first.line, result.findings[0].first.column),
            (2, 3)
        );
        assert_eq!(
            (result.findings[0].duplicate.line, result.findings[0].duplicate.column),
            (4, 3)
        );
    }

    #[test]
    fn test_jsx_component_body() {
        let source = r#"
export const Modal = ({ onClose }) => (
  <div className="modal" onClick={() => onClose()} role="dialog">
    {items.map((item) => (
      <Item key={item.id} {...item} key={item.id} />
    ))}
    <button type="button" onClick={() => { if (a > b) { onClose(); } }} className="btn" className="btn-primary">
      Close
    </button>
  </div>
);
"#;
        assert_eq!(duplicates(source), vec!["key", "className"]);
    }

    #[test]
    fn test_apostrophe_in_handler_comment_keeps_scanning() {
        let source = "<button onClick={() => {\n // don't close\n go();\n}} type=\"a\" type=\"b\">x</button>\n<a id id>";
        let result = Linter::scan(source);
        assert_eq!(duplicates(source), vec!["type", "id"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_apostrophe_in_render_prop_keeps_scanning() {
        let source = "<Foo render={() => <p>Don't</p>} x x />\n<a id id>";
        let result = Linter::scan(source);
        assert_eq!(duplicates(source), vec!["x", "id"]);
        assert!(result.warnings.is_empty());
    }

    // =========================================================================
    // Warnings
    // =========================================================================

    #[test]
    fn test_malformed_attribute_does_not_hide_duplicates() {
        let result = Linter::scan("<x a @ b a>");
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::MalformedAttribute);
        assert_eq!(result.warnings[0].span, Span::new(5, 6, 1, 6));
    }

    #[test]
    fn test_malformed_tag_keeps_earlier_findings() {
        let result = Linter::scan("<a x x>\n<b title=\"oops>");
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::MalformedTag);
        assert_eq!(result.warnings[0].span.line, 2);
        assert_eq!(result.tags_scanned, 1);
    }

    #[test]
    fn test_malformed_tag_is_not_a_duplicate() {
        let result = Linter::scan("<a x");
        assert!(!result.has_duplicates());
        assert!(result.has_warnings());
    }

    #[test]
    fn test_closing_tag_never_checked() {
        let tag = TagExtractor::new("</a x x>").next().unwrap().unwrap();
        let lines = LineIndex::new("</a x x>");
        assert_eq!(check_tag(&tag, &lines), TagCheck::default());
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    #[test]
    fn test_scan_is_idempotent() {
        let source = "<a x y x>\n<b q q q>\n<c {...p} z z/>";
        assert_eq!(Linter::scan(source), Linter::scan(source));
    }
}
