use serde::Serialize;

use crate::expr;
use crate::tag::{is_tag_name_byte, TagSpan};

/// One attribute occurrence. Values are skipped, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeToken<'a> {
    pub name: &'a str,
    /// Absolute byte offset of the name in the source text.
    pub offset: usize,
}

/// Item produced by [`AttributeTokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeEvent<'a> {
    Attribute(AttributeToken<'a>),
    /// A character that cannot start an attribute name. It is skipped and
    /// tokenizing resumes after it.
    Malformed { offset: usize, found: char },
}

/// Lexes the attribute names of a single tag, in source order.
///
/// The tag name and the closing `>`/`/>` are not part of the output. Values
/// (`"..."`, `'...'`, `{...}` or unquoted) are consumed without
/// interpretation so that `=`, `>` and whitespace inside them never look
/// like attribute boundaries.
#[derive(Debug, Clone)]
pub struct AttributeTokenizer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Offset of `text` within the source.
    base: usize,
    finished: bool,
}

/// Collect the attribute tokens of `tag`, dropping malformed-character events.
pub fn attributes<'a>(tag: &TagSpan<'a>) -> Vec<AttributeToken<'a>> {
    AttributeTokenizer::new(tag)
        .filter_map(|event| match event {
            AttributeEvent::Attribute(token) => Some(token),
            AttributeEvent::Malformed { .. } => None,
        })
        .collect()
}

impl<'a> AttributeTokenizer<'a> {
    pub fn new(tag: &TagSpan<'a>) -> Self {
        let bytes = tag.text.as_bytes();
        let mut pos = usize::from(bytes.first() == Some(&b'<'));
        if bytes.get(pos) == Some(&b'/') {
            pos += 1;
        }
        while bytes.get(pos).is_some_and(|&b| is_tag_name_byte(b)) {
            pos += 1;
        }
        Self {
            text: tag.text,
            bytes,
            pos,
            base: tag.span.start,
            finished: false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// `/` that closes the tag: only whitespace then `>` (or nothing) after it.
    fn at_self_close(&self) -> bool {
        self.bytes[self.pos + 1..]
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .map_or(true, |&b| b == b'>')
    }

    fn scan_name(&mut self) -> AttributeToken<'a> {
        let start = self.pos;
        while self.peek().is_some_and(is_attribute_name_byte) {
            self.pos += 1;
        }
        AttributeToken {
            name: &self.text[start..self.pos],
            offset: self.base + start,
        }
    }

    /// Consume an optional `= value`. Without `=` the attribute is boolean.
    fn skip_value(&mut self) {
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return;
        }
        self.pos += 1;
        self.skip_whitespace();
        self.pos = match self.peek() {
            Some(b'"' | b'\'') => skip_quoted(self.bytes, self.pos),
            Some(b'{') => skip_braced(self.bytes, self.pos),
            Some(_) => {
                let mut end = self.pos;
                while self
                    .bytes
                    .get(end)
                    .is_some_and(|&b| !b.is_ascii_whitespace() && b != b'>')
                {
                    end += 1;
                }
                end
            }
            None => self.pos,
        };
    }
}

impl<'a> Iterator for AttributeTokenizer<'a> {
    type Item = AttributeEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.skip_whitespace();
            let Some(b) = self.peek() else {
                self.finished = true;
                break;
            };
            match b {
                b'>' => self.finished = true,
                b'/' if self.at_self_close() => self.finished = true,
                // Spread attribute `{...props}`: no name to record.
                b'{' => self.pos = skip_braced(self.bytes, self.pos),
                b if is_attribute_name_byte(b) => {
                    let token = self.scan_name();
                    self.skip_value();
                    return Some(AttributeEvent::Attribute(token));
                }
                _ => {
                    let offset = self.base + self.pos;
                    let found = self.text[self.pos..].chars().next().unwrap_or('\u{FFFD}');
                    self.pos += found.len_utf8();
                    return Some(AttributeEvent::Malformed { offset, found });
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for AttributeTokenizer<'_> {}

pub(crate) fn is_attribute_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-')
}

/// Index just past the quote matching the one at `open`, honouring
/// backslash escapes. Unterminated quotes run to the end.
fn skip_quoted(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 2,
            _ if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index just past the `}` balancing the `{` at `open`. Closed strings,
/// template literals and comments inside the expression are skipped whole,
/// so braces inside them are not counted.
fn skip_braced(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while let Some(&b) = bytes.get(i) {
        let skipped = match b {
            b'/' => expr::skip_comment(bytes, i),
            b'"' | b'\'' | b'`' => expr::skip_string(bytes, i),
            _ => None,
        };
        if let Some(end) = skipped {
            i = end;
            continue;
        }
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}
