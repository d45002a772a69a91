//! Skipping helpers for the script inside `{...}` expressions.
//!
//! Both return `None` when nothing closes the construct. Callers then treat
//! the opening byte as ordinary text and keep counting braces, so a stray
//! apostrophe in JSX text (`<p>Don't</p>`) cannot swallow the rest of the
//! source.

/// Index just past a `//` or `/* */` comment starting at `i`.
///
/// Line comments end before the newline. `None` if `i` does not start a
/// comment or a block comment never closes.
pub(crate) fn skip_comment(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes.get(i + 1) {
        Some(b'/') => {
            let rest = &bytes[i + 2..];
            Some(i + 2 + rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len()))
        }
        Some(b'*') => bytes[i + 2..]
            .windows(2)
            .position(|w| w == b"*/")
            .map(|end| i + 2 + end + 2),
        _ => None,
    }
}

/// Index just past the string literal whose quote is at `open`.
///
/// `'` and `"` strings end at the first newline, backtick templates at end of
/// input; either way that counts as unterminated and gives `None`.
pub(crate) fn skip_string(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut i = open + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return None,
            _ if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment_stops_before_newline() {
        assert_eq!(skip_comment(b"// it's\nx", 0), Some(7));
        assert_eq!(skip_comment(b"// eof", 0), Some(6));
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(skip_comment(b"/* } */x", 0), Some(7));
        assert_eq!(skip_comment(b"/* open", 0), None);
    }

    #[test]
    fn test_slash_without_comment() {
        assert_eq!(skip_comment(b"</p>", 1), None);
        assert_eq!(skip_comment(b"a / b", 2), None);
    }

    #[test]
    fn test_closed_strings() {
        assert_eq!(skip_string(b"'}'x", 0), Some(3));
        assert_eq!(skip_string(br#""a\"b"c"#, 0), Some(6));
        assert_eq!(skip_string(b"`a\n}`x", 0), Some(5));
    }

    #[test]
    fn test_quote_unclosed_on_its_line() {
        assert_eq!(skip_string(b"'t</p>}\n'", 0), None);
        assert_eq!(skip_string(b"\"abc", 0), None);
        assert_eq!(skip_string(b"`abc", 0), None);
    }
}
