//! Lossless stylesheet scanner.
//!
//! The scanner splits raw CSS into a flat sequence of [`Token`]s. It is not a
//! validator: every byte of the input ends up in exactly one token, and the
//! concatenation of all token spans is the input again. Malformed text simply
//! becomes `Other` (or a best-effort `Declaration`).
//!
//! ```text
//! ".a { float: right; /* !rtl-only */ }"
//!  └┬┘└┘└┘└────┬─────┘└┘└──────┬─────┘└┘└┘
//!   │  │ │     │       │       │      │ └ BlockClose
//!   │  │ │     │       │       │      └ Whitespace
//!   │  │ │     │       │       └ Comment
//!   │  │ │     │       └ Whitespace
//!   │  │ │     └ Declaration (property "float", value "right")
//!   │  │ └ Whitespace
//!   │  └ BlockOpen
//!   └ Selector (".a ")
//! ```
//!
//! A *statement* runs until `{`, `}`, `;` or the end of input. Those
//! delimiters are ignored inside quoted strings, comments and parentheses, so
//! `url("data:image/png;base64,...")` is never split and a comment inside a
//! selector or declaration stays part of it. Comments trailing a statement
//! that ends at `}` or the end of input become their own tokens.

use crate::{DeclarationParts, Range, Token, TokenKind};

/// Scan `input` into tokens. Never fails.
pub(crate) fn scan(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let b = bytes[pos];

        let kind = if b.is_ascii_whitespace() {
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            TokenKind::Whitespace
        } else if starts_comment(bytes, pos) {
            pos = comment_end(bytes, pos);
            TokenKind::Comment
        } else if b == b'{' {
            pos += 1;
            TokenKind::BlockOpen
        } else if b == b'}' {
            pos += 1;
            TokenKind::BlockClose
        } else if b == b';' {
            pos += 1;
            TokenKind::Other
        } else {
            let statement = scan_statement(bytes, pos);
            pos = statement.end;
            statement.kind
        };

        tokens.push(Token { kind, range: Range::new(start, pos) });
    }

    tokens
}

struct Statement {
    kind: TokenKind,
    end: usize,
}

/// Scan a statement starting at `start` and classify it.
fn scan_statement(bytes: &[u8], start: usize) -> Statement {
    let mut pos = start;
    let mut depth = 0usize;
    let mut colon: Option<usize> = None;
    // Start of the comments after the last non-comment content, if any.
    let mut trailing_comment: Option<usize> = None;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' | b'\'' => {
                trailing_comment = None;
                pos = string_end(bytes, pos);
                continue;
            }
            b'/' if depth == 0 && starts_comment(bytes, pos) => {
                trailing_comment.get_or_insert(pos);
                pos = comment_end(bytes, pos);
                continue;
            }
            b'{' | b'}' | b';' if depth == 0 => break,
            b if b.is_ascii_whitespace() => {}
            b => {
                trailing_comment = None;
                match b {
                    b'(' => depth += 1,
                    b')' => depth = depth.saturating_sub(1),
                    b':' if depth == 0 && colon.is_none() => colon = Some(pos),
                    _ => {}
                }
            }
        }
        pos += 1;
    }

    let terminator = bytes.get(pos).copied();
    if terminator == Some(b'{') {
        return Statement { kind: TokenKind::Selector, end: pos };
    }

    // Before `}` or the end of input, trailing comments are left out of the
    // statement so they can annotate it.
    let (content_end, end) = match terminator {
        Some(b';') => (pos, pos + 1),
        _ => {
            let content_end = trailing_comment.unwrap_or(pos);
            (content_end, content_end)
        }
    };

    let Some(colon) = colon else {
        return Statement { kind: TokenKind::Other, end };
    };

    let property = trimmed(bytes, start, colon);
    let value = trimmed(bytes, colon + 1, content_end);
    let important = ends_with_important(&bytes[value.start..value.end]);

    Statement { kind: TokenKind::Declaration(DeclarationParts { property, value, important }), end }
}

pub(crate) fn starts_comment(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'/') && bytes.get(pos + 1) == Some(&b'*')
}

/// End offset (exclusive) of the comment starting at `pos`. Unterminated
/// comments run to the end of input.
pub(crate) fn comment_end(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// End offset (exclusive) of the quoted string starting at `pos`.
pub(crate) fn string_end(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            // Unescaped newline ends a bad string in CSS.
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn trimmed(bytes: &[u8], mut start: usize, mut end: usize) -> Range {
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    Range::new(start, end)
}

fn ends_with_important(value: &[u8]) -> bool {
    let Some(bang) = value.iter().rposition(|&b| b == b'!') else {
        return false;
    };
    let rest = std::str::from_utf8(&value[bang + 1..]).unwrap_or("");
    rest.trim_start().eq_ignore_ascii_case("important")
}
