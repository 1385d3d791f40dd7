//! Annotation association.
//!
//! Authors mark single declarations with a trailing comment:
//!
//! ```text
//! clear: left; /* !direction-ignore */   never mirrored
//! float: left; /* !ltr-only */           only kept when cleaning for ltr
//! float: right; /* !rtl-only */          only kept when cleaning for rtl
//! ```
//!
//! This runs as a separate pass over the scanner output: for each
//! `Declaration` token it looks past at most one whitespace token (newlines
//! included) for a comment whose body, ignoring whitespace, is one of the
//! markers above. Only that first comment is considered, so a declaration has
//! at most one annotation and the annotation never reaches a sibling.

use crate::{Direction, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnnotationKind {
    /// `!direction-ignore`
    Ignore,
    /// `!ltr-only` / `!rtl-only`
    Only(Direction),
}

/// An annotation attached to the declaration token preceding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Annotation {
    pub kind: AnnotationKind,
    /// Token index of the annotation comment.
    pub comment: usize,
    /// Token index of the whitespace between declaration and comment, if any.
    pub gap: Option<usize>,
}

/// Resolve annotations for every token. The result is aligned with `tokens`;
/// only `Declaration` positions can hold `Some`.
pub(crate) fn resolve(input: &str, tokens: &[Token]) -> Vec<Option<Annotation>> {
    let mut out = vec![None; tokens.len()];

    for (idx, token) in tokens.iter().enumerate() {
        if !matches!(token.kind, TokenKind::Declaration(_)) {
            continue;
        }

        let mut next = idx + 1;
        let mut gap = None;
        if tokens.get(next).is_some_and(|t| t.kind == TokenKind::Whitespace) {
            gap = Some(next);
            next += 1;
        }

        let Some(comment) = tokens.get(next).filter(|t| t.kind == TokenKind::Comment) else {
            continue;
        };

        if let Some(kind) = classify(comment.range.slice(input)) {
            out[idx] = Some(Annotation { kind, comment: next, gap });
        }
    }

    out
}

/// Classify a comment (including its delimiters) as an annotation marker.
pub(crate) fn classify(comment: &str) -> Option<AnnotationKind> {
    let body = comment.strip_prefix("/*")?;
    let body = body.strip_suffix("*/").unwrap_or(body);
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();

    match compact.as_str() {
        "!direction-ignore" => Some(AnnotationKind::Ignore),
        "!ltr-only" => Some(AnnotationKind::Only(Direction::Ltr)),
        "!rtl-only" => Some(AnnotationKind::Only(Direction::Rtl)),
        _ => None,
    }
}

/// Gap text as emitted next to an annotated declaration: line breaks are
/// dropped, and a gap made only of line breaks becomes a single space.
pub(crate) fn normalize_gap(gap: &str) -> String {
    let kept: String = gap.chars().filter(|&c| c != '\n' && c != '\r').collect();
    if kept.is_empty() && !gap.is_empty() { " ".to_string() } else { kept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scanner::scan;

    fn annotated(input: &str) -> Vec<(String, AnnotationKind)> {
        let tokens = scan(input);
        resolve(input, &tokens)
            .into_iter()
            .enumerate()
            .filter_map(|(idx, a)| a.map(|a| (tokens[idx].range.slice(input).to_string(), a.kind)))
            .collect()
    }

    #[test]
    fn classifies_markers_whitespace_insensitively() {
        assert_eq!(classify("/* !direction-ignore */"), Some(AnnotationKind::Ignore));
        assert_eq!(classify("/*!direction-ignore*/"), Some(AnnotationKind::Ignore));
        assert_eq!(classify("/*  !rtl-only  */"), Some(AnnotationKind::Only(Direction::Rtl)));
        assert_eq!(classify("/*\t!ltr-only\n*/"), Some(AnnotationKind::Only(Direction::Ltr)));
        assert_eq!(classify("/* !RTL-only */"), None);
        assert_eq!(classify("/* rtl-only */"), None);
        assert_eq!(classify("/* !rtl-only please */"), None);
    }

    #[test]
    fn attaches_to_preceding_declaration_only() {
        let got = annotated(".a { float: left; /* !ltr-only */ color: red; }");
        assert_eq!(got, vec![("float: left;".to_string(), AnnotationKind::Only(Direction::Ltr))]);
    }

    #[test]
    fn attaches_across_newline() {
        let got = annotated(".foo { clear: left !important;\n /* !direction-ignore */ }");
        assert_eq!(got, vec![("clear: left !important;".to_string(), AnnotationKind::Ignore)]);
    }

    #[test]
    fn first_comment_wins() {
        let got = annotated("a { float: left; /* !rtl-only */ /* !ltr-only */ }");
        assert_eq!(got, vec![("float: left;".to_string(), AnnotationKind::Only(Direction::Rtl))]);

        // A plain comment in between hides a later marker.
        assert!(annotated("a { float: left; /* note */ /* !rtl-only */ }").is_empty());
    }

    #[test]
    fn comment_before_declaration_is_not_an_annotation() {
        assert!(annotated("a { /* !rtl-only */ float: left; }").is_empty());
    }

    #[test]
    fn normalizes_gap() {
        assert_eq!(normalize_gap("\n "), " ");
        assert_eq!(normalize_gap("\n"), " ");
        assert_eq!(normalize_gap("\r\n\t"), "\t");
        assert_eq!(normalize_gap("  "), "  ");
        assert_eq!(normalize_gap(""), "");
    }
}
