//! The clean engine: resolve direction-only annotations for one direction.
//!
//! Given a target direction `d`:
//!
//! - declarations marked for the other direction are deleted, together with
//!   their annotation and the indentation leading up to them;
//! - declarations marked `!d-only` lose their marker;
//! - `!direction-ignore` markers stay for the flip pass;
//! - `direction:d;` is inserted right after the `{` of the first top-level
//!   `body` rule, or `body{direction:d;}` is prepended when there is none.
//!
//! Blocks left empty by deletions are kept.

use super::annotations::{self, AnnotationKind};
use super::scanner::scan;
use crate::rules::helpers::without_comments;
use crate::{Direction, TokenKind};

pub(crate) fn run(input: &str, direction: Direction) -> String {
    let tokens = scan(input);
    let annotations = annotations::resolve(input, &tokens);

    let mut out = String::with_capacity(input.len() + 32);
    let mut body_insert: Option<usize> = None;
    let mut pending_body = false;
    let mut depth = 0usize;
    let (mut removed, mut unmarked) = (0usize, 0usize);
    let mut idx = 0;

    while idx < tokens.len() {
        let token = &tokens[idx];
        let text = token.range.slice(input);

        match (&token.kind, annotations[idx]) {
            (TokenKind::Declaration(_), Some(annotation)) => match annotation.kind {
                AnnotationKind::Only(only) if only == direction => {
                    unmarked += 1;
                    out.push_str(text);
                    idx = annotation.comment + 1;
                    continue;
                }
                AnnotationKind::Only(_) => {
                    removed += 1;
                    if idx > 0 && tokens[idx - 1].kind == TokenKind::Whitespace {
                        let leading = tokens[idx - 1].range.slice(input);
                        out.truncate(out.len() - removable_indent(leading).len());
                    }
                    idx = annotation.comment + 1;
                    continue;
                }
                AnnotationKind::Ignore => out.push_str(text),
            },
            (TokenKind::Selector, _) => {
                if depth == 0 && body_insert.is_none() && is_body_selector(text) {
                    pending_body = true;
                }
                out.push_str(text);
            }
            (TokenKind::BlockOpen, _) => {
                depth += 1;
                out.push_str(text);
                if pending_body {
                    body_insert = Some(out.len());
                    pending_body = false;
                }
            }
            (TokenKind::BlockClose, _) => {
                depth = depth.saturating_sub(1);
                out.push_str(text);
            }
            _ => out.push_str(text),
        }
        idx += 1;
    }

    let declaration = format!("direction:{direction};");
    match body_insert {
        Some(at) => out.insert_str(at, &declaration),
        None => out.insert_str(0, &format!("body{{{declaration}}}")),
    }

    tracing::debug!(%direction, removed, unmarked, synthesized_body = body_insert.is_none(), "clean complete");
    out
}

/// The tail of the whitespace before a deleted declaration that goes with it:
/// everything from the last line break, or all of it on a single line.
fn removable_indent(leading: &str) -> &str {
    match leading.rfind('\n') {
        Some(nl) if nl > 0 && leading.as_bytes()[nl - 1] == b'\r' => &leading[nl - 1..],
        Some(nl) => &leading[nl..],
        None => leading,
    }
}

/// `body`, possibly as one entry of a selector list. Comments are ignored.
fn is_body_selector(selector: &str) -> bool {
    without_comments(selector).split(',').any(|s| s.trim().eq_ignore_ascii_case("body"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_direction_into_body() {
        assert_eq!(
            run("body { display: inline-block; }", Direction::Rtl),
            "body {direction:rtl; display: inline-block; }"
        );
        assert_eq!(
            run("foo {} body { display: inline-block; } bar {}", Direction::Rtl),
            "foo {} body {direction:rtl; display: inline-block; } bar {}"
        );
        assert_eq!(run("html, body{margin:0}", Direction::Ltr), "html, body{direction:ltr;margin:0}");
    }

    #[test]
    fn commented_body_selector_is_recognized() {
        assert_eq!(
            run("body /* main */ { color: red; }", Direction::Rtl),
            "body /* main */ {direction:rtl; color: red; }"
        );
        assert_eq!(run("/* x */body/* y */,html{}", Direction::Ltr), "/* x */body/* y */,html{direction:ltr;}");
    }

    #[test]
    fn annotations_after_declarations_with_inner_comments() {
        let input = "body{}.a{float: /* edge */ left; /* !ltr-only */ color: red;}";
        assert_eq!(run(input, Direction::Rtl), "body{direction:rtl;}.a{ color: red;}");
        assert_eq!(run(input, Direction::Ltr), "body{direction:ltr;}.a{float: /* edge */ left; color: red;}");
    }

    #[test]
    fn synthesizes_body_when_missing() {
        assert_eq!(run("div { display: inline-block; }", Direction::Rtl), "body{direction:rtl;}div { display: inline-block; }");
        assert_eq!(run("", Direction::Ltr), "body{direction:ltr;}");
        // Nested `body` rules and compound selectors do not count.
        assert_eq!(
            run("@media print { body { color: red; } } .body {}", Direction::Rtl),
            "body{direction:rtl;}@media print { body { color: red; } } .body {}"
        );
    }

    #[test]
    fn removes_other_direction_and_unmarks_own() {
        let input = "body {}\n.a {\n  float: left; /* !ltr-only */\n  float: right; /* !rtl-only */\n  color: red;\n}\n";
        assert_eq!(
            run(input, Direction::Ltr),
            "body {direction:ltr;}\n.a {\n  float: left;\n  color: red;\n}\n"
        );
        assert_eq!(
            run(input, Direction::Rtl),
            "body {direction:rtl;}\n.a {\n  float: right;\n  color: red;\n}\n"
        );
    }

    #[test]
    fn single_line_removal_and_empty_blocks() {
        assert_eq!(
            run("body{} .a { float: left; /* !ltr-only */ }", Direction::Rtl),
            "body{direction:rtl;} .a { }"
        );
    }

    #[test]
    fn keeps_ignore_markers() {
        let input = "body{}.a{clear:left;/* !direction-ignore */}";
        assert_eq!(run(input, Direction::Rtl), "body{direction:rtl;}.a{clear:left;/* !direction-ignore */}");
    }

    #[test]
    fn trims_crlf_indentation() {
        assert_eq!(removable_indent("\r\n  "), "\r\n  ");
        assert_eq!(removable_indent("\n\n    "), "\n    ");
        assert_eq!(removable_indent("  "), "  ");
    }
}
