use dupattr_lexer::{LexerError, Span, TagSpan};
use serde::Serialize;

/// The same attribute name declared twice on one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFinding<'a> {
    pub tag: TagSpan<'a>,
    pub name: &'a str,
    /// Where the name was first declared on this tag.
    pub first: Span,
    pub duplicate: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Unterminated tag, quote, brace expression or comment. Scanning
    /// stopped at this point.
    MalformedTag,
    /// Unexpected character where an attribute name was expected.
    MalformedAttribute,
}

/// A lexing problem. Never a duplicate, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
    pub span: Span,
}

impl From<LexerError> for Warning {
    fn from(e: LexerError) -> Self {
        Self {
            kind: WarningKind::MalformedTag,
            message: e.message,
            span: Span::new(e.offset, e.offset, e.line, e.column),
        }
    }
}

/// Everything one scan found, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult<'a> {
    pub findings: Vec<DuplicateFinding<'a>>,
    pub warnings: Vec<Warning>,
    pub tags_scanned: usize,
}

impl ScanResult<'_> {
    pub fn has_duplicates(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Neither duplicates nor warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_duplicates() && !self.has_warnings()
    }
}
