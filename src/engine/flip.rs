//! The flip engine: mirror a stylesheet for the opposite direction.
//!
//! ```text
//! input ── scan ── annotations::resolve ──┐
//!                                         v
//!   Selector        -> word swap
//!   Declaration     -> CompiledRules (property, then value)
//!   annotated decl  -> verbatim (gap normalized for ignore)
//!   everything else -> verbatim (Other may produce a warning)
//! ```
//!
//! The engine never prints; warnings are returned to the caller.

use super::annotations::{self, AnnotationKind, normalize_gap};
use super::compiled_rules::{CompiledRules, SwapSet};
use super::scanner::scan;
use crate::api::Warning;
use crate::rules::helpers::{SegmentKind, contains_direction, segments, swap_words, without_comments};
use crate::{DeclarationParts, Range, Target, Token, TokenKind};

/// Output of one flip run.
#[derive(Debug, Clone)]
pub(crate) struct FlipRun {
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// Flip `input` using `rules`. When `collect_warnings` is false the warning
/// list is always empty.
pub(crate) fn run(input: &str, rules: &CompiledRules<'_>, collect_warnings: bool) -> FlipRun {
    let tokens = scan(input);
    let annotations = annotations::resolve(input, &tokens);

    let mut out = String::with_capacity(input.len());
    let mut warnings = Vec::new();
    let mut annotated = 0usize;
    let mut idx = 0;

    while idx < tokens.len() {
        let token = &tokens[idx];
        let text = token.range.slice(input);

        match (&token.kind, annotations[idx]) {
            (TokenKind::Declaration(_), Some(annotation)) => {
                annotated += 1;
                out.push_str(text);
                if let Some(gap) = annotation.gap {
                    let gap = tokens[gap].range.slice(input);
                    match annotation.kind {
                        AnnotationKind::Ignore => out.push_str(&normalize_gap(gap)),
                        AnnotationKind::Only(_) => out.push_str(gap),
                    }
                }
                out.push_str(tokens[annotation.comment].range.slice(input));
                idx = annotation.comment + 1;
                continue;
            }
            (TokenKind::Declaration(parts), None) => {
                out.push_str(&flip_declaration(input, token, parts, rules));
                if collect_warnings {
                    declaration_warnings(input, parts, &mut warnings);
                }
            }
            (TokenKind::Selector, _) if rules.swaps.contains(SwapSet::SELECTORS) => {
                out.push_str(swap_words(text).as_deref().unwrap_or(text));
            }
            (TokenKind::Other, _) => {
                out.push_str(text);
                if collect_warnings && contains_direction(text) {
                    warnings.push(Warning::new(
                        "Warning: Unrecognized content mentions a direction and was left unchanged".to_string(),
                        token.range,
                        input,
                    ));
                }
            }
            _ => out.push_str(text),
        }
        idx += 1;
    }

    tracing::debug!(
        tokens = tokens.len(),
        annotated,
        warnings = warnings.len(),
        changed = out != input,
        "flip complete"
    );

    FlipRun { text: out, warnings }
}

/// Rebuild one declaration with its property and value rewritten. Whitespace,
/// comments, the colon and the terminating `;` stay as written.
fn flip_declaration(input: &str, token: &Token, parts: &DeclarationParts, rules: &CompiledRules<'_>) -> String {
    let property = parts.property.slice(input);
    let value = parts.value.slice(input);
    let name = property_name(property);

    let new_property = rules.rewrite(Target::Property, &name, property);
    let new_value = rules.rewrite(Target::Value, &name, value);

    let mut out = String::with_capacity(token.range.end - token.range.start);
    out.push_str(&input[token.range.start..parts.property.start]);
    out.push_str(new_property.as_deref().unwrap_or(property));
    out.push_str(&input[parts.property.end..parts.value.start]);
    out.push_str(new_value.as_deref().unwrap_or(value));
    out.push_str(&input[parts.value.end..token.range.end]);
    out
}

/// Property name as matched by the rules: comments dropped, trimmed.
fn property_name(property: &str) -> String {
    without_comments(property).trim().to_string()
}

/// Warn about embedded content inside a value that the rules do not rewrite.
///
/// Every `data:` URI is reported, directional word or not: the image itself may
/// be drawn for one direction.
fn declaration_warnings(input: &str, parts: &DeclarationParts, warnings: &mut Vec<Warning>) {
    let property = property_name(parts.property.slice(input));
    let value = parts.value.slice(input);

    for seg in segments(value) {
        let range = Range::new(parts.value.start + seg.range.start, parts.value.start + seg.range.end);
        let message = match seg.kind {
            SegmentKind::DataUri => format!("Warning: Inline image in `{property}` cannot be mirrored automatically"),
            SegmentKind::Text if contains_direction(seg.range.slice(value)) => {
                format!("Warning: Inline text in `{property}` mentions a direction and was left unchanged")
            }
            _ => continue,
        };
        warnings.push(Warning::new(message, range, input));
    }
}
