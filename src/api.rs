use crate::engine::{self, CompiledRules, SwapSet};
use crate::{Direction, Range, Result, SwapRule};
use once_cell::sync::Lazy;
use std::fmt;

static DEFAULT_RULES: Lazy<Vec<SwapRule>> = Lazy::new(crate::rules::get);

/// Options for [`flip_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Collect [`Warning`]s for directional content that is left unchanged.
    pub warnings: bool,
    /// Which classes of rewrites to apply.
    pub swaps: SwapSet,
}

impl Default for Options {
    fn default() -> Self {
        Self { warnings: false, swaps: SwapSet::all() }
    }
}

/// An advisory note about content the flip pass declined to rewrite.
///
/// Warnings never stop a run; the mirrored text is complete either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    /// Byte span of the offending content in the input.
    pub range: Range,
    /// 1-based line of `range.start`.
    pub line: usize,
    /// 1-based column (in characters) of `range.start`.
    pub column: usize,
}

impl Warning {
    pub(crate) fn new(message: String, range: Range, input: &str) -> Self {
        let before = &input[..range.start];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { message, range, line, column }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, column {})", self.message, self.line, self.column)
    }
}

/// Result from [`flip_with`].
#[derive(Debug, Clone)]
pub struct FlipResult {
    /// The mirrored stylesheet.
    pub text: String,
    /// Warnings in source order; empty unless [`Options::warnings`] is set.
    pub warnings: Vec<Warning>,
}

/// Mirror `css` for the opposite writing direction using every rule.
///
/// # Example
/// ```
/// assert_eq!(flipcss::flip(".pull-right { float: right; }"), ".pull-left { float: left; }");
/// ```
pub fn flip(css: &str) -> String {
    flip_with(css, &Options::default()).text
}

/// Mirror `css` with explicit [`Options`].
pub fn flip_with(css: &str, options: &Options) -> FlipResult {
    let rules = CompiledRules::new(&DEFAULT_RULES, options.swaps);
    let run = engine::flip(css, &rules, options.warnings);
    FlipResult { text: run.text, warnings: run.warnings }
}

/// Resolve direction-only annotations for `direction` (`"ltr"` or `"rtl"`).
///
/// Fails only when `direction` is not one of the two literals.
///
/// # Example
/// ```
/// let out = flipcss::clean("div { display: inline-block; }", "rtl").unwrap();
/// assert_eq!(out, "body{direction:rtl;}div { display: inline-block; }");
/// ```
pub fn clean(css: &str, direction: &str) -> Result<String> {
    let direction: Direction = direction.parse()?;
    Ok(clean_with(css, direction))
}

/// [`clean`] with an already parsed [`Direction`].
pub fn clean_with(css: &str, direction: Direction) -> String {
    engine::clean(css, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn flip_uses_every_rule_by_default() {
        assert_eq!(
            flip(".a { margin-left: 0; padding: 1px 2px 3px 4px; background-position: 20% 0; text-align: left; }"),
            ".a { margin-right: 0; padding: 1px 4px 3px 2px; background-position: 80% 0; text-align: right; }"
        );
    }

    #[test]
    fn flip_with_restricted_swaps() {
        let options = Options { warnings: false, swaps: SwapSet::PROPERTIES };
        let res = flip_with(".pull-left { margin-left: 0; float: left; }", &options);
        assert_eq!(res.text, ".pull-left { margin-right: 0; float: left; }");
    }

    #[test]
    fn warnings_only_when_requested() {
        let css = ".a { content: \"left\"; }";
        assert!(flip_with(css, &Options::default()).warnings.is_empty());

        let res = flip_with(css, &Options { warnings: true, ..Options::default() });
        assert_eq!(res.text, css);
        assert_eq!(res.warnings.len(), 1);
        assert_eq!(res.warnings[0].to_string(), format!("{} (line 1, column 15)", res.warnings[0].message));
    }

    #[test]
    fn warning_positions_count_lines_and_chars() {
        let input = "a {}\nbé { x: \"left\" }";
        let start = input.find('"').unwrap();
        let w = Warning::new("m".to_string(), Range::new(start, start + 6), input);
        assert_eq!((w.line, w.column), (2, 9));
    }

    #[test]
    fn clean_rejects_unknown_direction() {
        assert!(matches!(clean("a {}", "RTL"), Err(Error::InvalidDirection(d)) if d == "RTL"));
        assert!(matches!(clean("a {}", "up"), Err(Error::InvalidDirection(_))));
        assert_eq!(clean("a {}", "ltr").unwrap(), "body{direction:ltr;}a {}");
    }
}
