//! dupattr Lexer
//!
//! Splits markup-like source (HTML, JSX/TSX component bodies) into tag
//! openings and the attribute names declared on each one, without building a
//! DOM. Quoted values, `{...}` expression values, multi-line tags and
//! comments are lexed with explicit state so value content is never mistaken
//! for tag structure.
//!
//! ```text
//! SourceText → TagExtractor → TagSpan → AttributeTokenizer → AttributeToken
//! ```
//!
//! # Example
//!
//! ```
//! use dupattr_lexer::{attributes, extract_tags};
//!
//! let tag = extract_tags("<input type=\"text\" disabled />").next().unwrap().unwrap();
//! let names: Vec<_> = attributes(&tag).into_iter().map(|a| a.name).collect();
//! assert_eq!(names, ["type", "disabled"]);
//! ```

pub mod attribute;
mod expr;
pub mod span;
pub mod tag;

pub use attribute::{attributes, AttributeEvent, AttributeToken, AttributeTokenizer};
pub use span::{LineIndex, Span};
pub use tag::{extract_tags, TagExtractor, TagSpan};

/// An unterminated tag, quote, brace expression or comment.
///
/// Scanning stops at the first one; everything after it is treated as
/// outside any tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed tag at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}
