use serde::Serialize;

use crate::expr;
use crate::span::{LineIndex, Span};
use crate::LexerError;

const MARKUP_COMMENT_START: &str = "<!--";
const MARKUP_COMMENT_END: &str = "-->";
const JSX_COMMENT_START: &str = "{/*";
const JSX_COMMENT_END: &str = "*/";

/// One complete tag opening (or closing tag), from `<` through its `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagSpan<'a> {
    /// Raw tag text, including the delimiters.
    pub text: &'a str,
    /// Tag name as written (`div`, `Foo.Bar`); empty for fragments.
    pub name: &'a str,
    pub span: Span,
}

impl TagSpan<'_> {
    /// `</name>`
    pub fn is_closing(&self) -> bool {
        self.text.starts_with("</")
    }

    /// `<name ... />`
    pub fn is_self_closing(&self) -> bool {
        self.text
            .strip_suffix('>')
            .is_some_and(|body| body.trim_end().ends_with('/'))
    }
}

/// Lexer state while inside a tag. `OUTSIDE_TAG` and `IN_COMMENT` are the
/// extractor's position in [`TagExtractor::scan_next`] and need no stack.
///
/// Strings and comments inside a brace expression are skipped in one step
/// (see [`crate::expr`]) rather than pushed, so they never outlive the
/// expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InTag,
    InSingleQuote,
    InDoubleQuote,
    InBraceExpr,
}

impl State {
    fn describe(self) -> &'static str {
        match self {
            State::InTag => "tag",
            State::InSingleQuote => "single-quoted value",
            State::InDoubleQuote => "double-quoted value",
            State::InBraceExpr => "brace expression",
        }
    }
}

/// Yields every tag in `source`, left to right.
///
/// The first malformed construct is yielded as an `Err` and ends the
/// sequence. Build a new extractor to scan the same text again.
#[derive(Debug, Clone)]
pub struct TagExtractor<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    lines: LineIndex<'a>,
    done: bool,
}

/// Shorthand for [`TagExtractor::new`].
pub fn extract_tags(source: &str) -> TagExtractor<'_> {
    TagExtractor::new(source)
}

impl<'a> TagExtractor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            lines: LineIndex::new(source),
            done: false,
        }
    }

    /// Line index over the whole source, for resolving offsets inside tags.
    pub fn line_index(&self) -> &LineIndex<'a> {
        &self.lines
    }

    /// Advance past non-tag content to the next tag. `Ok(None)` at end of input.
    fn scan_next(&mut self) -> Result<Option<TagSpan<'a>>, LexerError> {
        // Only ASCII bytes are matched below, so every slice boundary taken
        // at a match is also a char boundary.
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'\\' => self.pos += 2,
                b'<' if self.starts_with(MARKUP_COMMENT_START) => {
                    self.skip_comment(MARKUP_COMMENT_START, MARKUP_COMMENT_END)?;
                }
                b'{' if self.starts_with(JSX_COMMENT_START) => {
                    self.skip_comment(JSX_COMMENT_START, JSX_COMMENT_END)?;
                }
                b'<' if self.opens_tag() => return self.scan_tag().map(Some),
                _ => self.pos += 1,
            }
        }
        Ok(None)
    }

    /// `<` followed by a letter or `/`.
    fn opens_tag(&self) -> bool {
        self.bytes
            .get(self.pos + 1)
            .is_some_and(|&next| next.is_ascii_alphabetic() || next == b'/')
    }

    fn skip_comment(&mut self, open: &str, close: &str) -> Result<(), LexerError> {
        let start = self.pos;
        let body = start + open.len();
        match self.source[body..].find(close) {
            Some(end) => {
                self.pos = body + end + close.len();
                log::trace!(target: "dupattr::tag", "skipped comment at {start}..{}", self.pos);
                Ok(())
            }
            None => Err(self.error(start, format!("unterminated comment `{open}`"))),
        }
    }

    /// Scan one tag starting at the `<` under the cursor.
    fn scan_tag(&mut self) -> Result<TagSpan<'a>, LexerError> {
        let start = self.pos;
        // Each entry remembers where its construct opened, for error reporting.
        let mut stack = vec![(State::InTag, start)];
        self.pos += 1;

        while let Some(&b) = self.bytes.get(self.pos) {
            let Some(&(state, _)) = stack.last() else {
                break;
            };
            let at = self.pos;
            match (state, b) {
                (State::InTag, b'>') => {
                    self.pos += 1;
                    return Ok(self.tag_span(start, self.pos));
                }
                (State::InTag | State::InSingleQuote | State::InDoubleQuote, b'\\') => {
                    self.pos += 2;
                    continue;
                }
                (State::InTag, b'"') => stack.push((State::InDoubleQuote, at)),
                (State::InTag, b'\'') => stack.push((State::InSingleQuote, at)),
                (State::InTag | State::InBraceExpr, b'{') => {
                    stack.push((State::InBraceExpr, at));
                }
                (State::InBraceExpr, b'/') => {
                    if let Some(end) = expr::skip_comment(self.bytes, at) {
                        self.pos = end;
                        continue;
                    }
                }
                // An unclosed string is just a character, e.g. `Don't` in JSX text.
                (State::InBraceExpr, b'"' | b'\'' | b'`') => {
                    if let Some(end) = expr::skip_string(self.bytes, at) {
                        self.pos = end;
                        continue;
                    }
                }
                (State::InDoubleQuote, b'"')
                | (State::InSingleQuote, b'\'')
                | (State::InBraceExpr, b'}') => {
                    stack.pop();
                }
                _ => {}
            }
            self.pos += 1;
        }

        let (state, opened_at) = stack.last().copied().unwrap_or((State::InTag, start));
        let (line, column) = self.lines.position(start);
        let message = match state {
            State::InTag => format!("unterminated tag `<{}`", self.partial_name(start)),
            _ => format!(
                "unterminated {} in tag opened at line {line}, column {column}",
                state.describe()
            ),
        };
        Err(self.error(opened_at, message))
    }

    fn tag_span(&self, start: usize, end: usize) -> TagSpan<'a> {
        let text = &self.source[start..end];
        let name = tag_name(text);
        let span = self.lines.span(start, end);
        log::trace!(
            target: "dupattr::tag",
            "tag `{name}` at {}:{} ({start}..{end})",
            span.line,
            span.column
        );
        TagSpan { text, name, span }
    }

    fn partial_name(&self, start: usize) -> &'a str {
        tag_name(&self.source[start..])
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.bytes[self.pos..].starts_with(needle.as_bytes())
    }

    fn error(&self, offset: usize, message: String) -> LexerError {
        let (line, column) = self.lines.position(offset);
        LexerError {
            message,
            offset,
            line,
            column,
        }
    }
}

impl<'a> Iterator for TagExtractor<'a> {
    type Item = Result<TagSpan<'a>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scan_next() {
            Ok(Some(tag)) => Some(Ok(tag)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for TagExtractor<'_> {}

/// Name following `<` or `</` at the start of `text`.
pub(crate) fn tag_name(text: &str) -> &str {
    let rest = text.strip_prefix('<').unwrap_or(text);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let len = rest.bytes().take_while(|&b| is_tag_name_byte(b)).count();
    &rest[..len]
}

/// Tag names allow `.` for JSX member expressions (`<Foo.Bar>`).
pub(crate) fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-' | b'.')
}
