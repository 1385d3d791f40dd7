use regex::{Captures, Regex};

use crate::Range;
use crate::engine::scanner::{comment_end, starts_comment, string_end};

/// Matches `left`/`right` as a whole word. Letters, digits and underscores are
/// word characters; a hyphen is not, so `pull-right` and `arrow-left.png`
/// match while `copyright` and `rights.png` do not.
pub fn direction_words() -> &'static Regex {
    regex!(r"(?i)\b(?:left|right)\b")
}

/// True if `text` mentions `left` or `right` as a word outside of comments.
pub fn contains_direction(text: &str) -> bool {
    code_ranges(text).iter().any(|r| direction_words().is_match(r.slice(text)))
}

/// Swap every whole-word `left`/`right` in `text`, preserving case. Comments
/// are kept as written.
pub fn swap_words(text: &str) -> Option<String> {
    let replacements: Vec<_> = code_ranges(text)
        .into_iter()
        .filter_map(|r| {
            let code = r.slice(text);
            let swapped = direction_words().replace_all(code, |caps: &Captures| mirror_word(&caps[0]));
            (swapped != code).then(|| (r, swapped.into_owned()))
        })
        .collect();

    if replacements.is_empty() { None } else { Some(splice(text, &replacements)) }
}

/// `left` -> `right` and back, copying the case of `word` letter by letter.
/// The extra `t` of `right` takes the case of the letter before it.
///
/// A `right` whose last two letters differ in case (`RighT`) has no `left`
/// that maps back to it and is returned unchanged.
pub fn mirror_word(word: &str) -> String {
    let target = if word.eq_ignore_ascii_case("left") { "right" } else { "left" };
    let cases: Vec<bool> = word.chars().map(|c| c.is_ascii_uppercase()).collect();
    if cases.len() == 5 && cases[3] != cases[4] {
        return word.to_string();
    }

    target
        .chars()
        .enumerate()
        .map(|(i, c)| if cases[i.min(cases.len() - 1)] { c.to_ascii_uppercase() } else { c })
        .collect()
}

/// Byte ranges of `text` outside of `/* */` comments. Quoted strings are
/// skipped over, so a `/*` inside quotes does not start a comment.
pub fn code_ranges(text: &str) -> Vec<Range> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'"' || bytes[pos] == b'\'' {
            pos = string_end(bytes, pos);
        } else if starts_comment(bytes, pos) {
            if start < pos {
                out.push(Range::new(start, pos));
            }
            pos = comment_end(bytes, pos);
            start = pos;
        } else {
            pos += 1;
        }
    }

    if start < bytes.len() {
        out.push(Range::new(start, bytes.len()));
    }
    out
}

/// `text` with its comments removed.
pub fn without_comments(text: &str) -> String {
    code_ranges(text).iter().map(|r| r.slice(text)).collect()
}

// --- Value segmentation -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Ordinary value text.
    Plain,
    /// `url(...)` pointing at a file; its path is mirrored like plain text.
    Url,
    /// `url(data:...)`: embedded content, never rewritten.
    DataUri,
    /// Quoted string outside `url()`, e.g. `content: "..."`; never rewritten.
    Text,
    /// `/* ... */`; never rewritten.
    Comment,
}

impl SegmentKind {
    pub fn is_rewritable(self) -> bool {
        matches!(self, SegmentKind::Plain | SegmentKind::Url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Range relative to the segmented text.
    pub range: Range,
}

/// Split a declaration value into plain text, `url()` calls, quoted strings
/// and comments. The segments cover `value` without gaps.
pub fn segments(value: &str) -> Vec<Segment> {
    let bytes = value.as_bytes();
    let mut out = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let special = if starts_comment(bytes, pos) {
            Some((SegmentKind::Comment, comment_end(bytes, pos)))
        } else if bytes[pos] == b'"' || bytes[pos] == b'\'' {
            Some((SegmentKind::Text, string_end(bytes, pos)))
        } else if starts_url(bytes, pos) {
            let end = url_end(bytes, pos + 4);
            let inner = value[pos + 4..end].trim_end_matches(')').trim();
            let inner = inner.trim_start_matches(['"', '\'']);
            let kind =
                if inner.get(..5).is_some_and(|s| s.eq_ignore_ascii_case("data:")) { SegmentKind::DataUri } else { SegmentKind::Url };
            Some((kind, end))
        } else {
            None
        };

        match special {
            Some((kind, end)) => {
                if plain_start < pos {
                    out.push(Segment { kind: SegmentKind::Plain, range: Range::new(plain_start, pos) });
                }
                out.push(Segment { kind, range: Range::new(pos, end) });
                pos = end;
                plain_start = end;
            }
            None => pos += 1,
        }
    }

    if plain_start < bytes.len() {
        out.push(Segment { kind: SegmentKind::Plain, range: Range::new(plain_start, bytes.len()) });
    }
    out
}

fn starts_url(bytes: &[u8], pos: usize) -> bool {
    let is_call = bytes.get(pos..pos + 4).is_some_and(|s| s.eq_ignore_ascii_case(b"url("));
    let at_word_start = pos == 0 || !(bytes[pos - 1].is_ascii_alphanumeric() || bytes[pos - 1] == b'-');
    is_call && at_word_start
}

/// End offset (exclusive, after `)`) of a `url(` whose contents start at `pos`.
fn url_end(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' | b'\'' => pos = string_end(bytes, pos),
            b')' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

// --- Components ---------------------------------------------------------------

/// Top-level components of a value: runs separated by whitespace or comments,
/// outside of parentheses and strings. Each top-level comma is its own
/// component; comments are not components.
pub fn components(value: &str) -> Vec<Range> {
    let bytes = value.as_bytes();
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if depth == 0 && starts_comment(bytes, pos) {
            if let Some(s) = start.take() {
                out.push(Range::new(s, pos));
            }
            pos = comment_end(bytes, pos);
            continue;
        }
        if depth == 0 && (b.is_ascii_whitespace() || b == b',') {
            if let Some(s) = start.take() {
                out.push(Range::new(s, pos));
            }
            if b == b',' {
                out.push(Range::new(pos, pos + 1));
            }
            pos += 1;
            continue;
        }

        start.get_or_insert(pos);
        match b {
            b'"' | b'\'' => {
                pos = string_end(bytes, pos);
                continue;
            }
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        pos += 1;
    }

    if let Some(s) = start {
        out.push(Range::new(s, bytes.len()));
    }
    out
}

/// Drop a trailing `!important` (or `! important`) from `components`.
pub fn without_important(value: &str, mut components: Vec<Range>) -> Vec<Range> {
    let text = |r: &Range| r.slice(value);

    if components.last().is_some_and(|r| text(r).eq_ignore_ascii_case("!important")) {
        components.pop();
    } else if components.len() >= 2
        && text(&components[components.len() - 1]).eq_ignore_ascii_case("important")
        && text(&components[components.len() - 2]) == "!"
    {
        components.truncate(components.len() - 2);
    }
    components
}

/// Replace `ranges` of `text` (sorted, non-overlapping) with new strings.
pub fn splice(text: &str, replacements: &[(Range, String)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (range, replacement) in replacements {
        out.push_str(&text[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

// --- Numbers ------------------------------------------------------------------

/// Whether `component` can be part of a background position: an edge keyword,
/// `center`, or a number with an optional unit or `%`.
pub fn is_position(component: &str) -> bool {
    const KEYWORDS: &[&str] = &["left", "right", "center", "top", "bottom"];
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(component))
        || regex!(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[a-zA-Z]+|%)?$").is_match(component)
}

/// Mirror a plain percentage across the horizontal axis: `p%` -> `(100 - p)%`.
///
/// Arithmetic is done in decimal with the input's number of fraction digits,
/// so `33.3%` becomes `66.7%` and mirroring twice returns the same digits.
/// An explicit `+` is kept while the result is not negative. A missing whole
/// part is written out (`.5%` -> `99.5%` -> `0.5%`).
/// Anything that is not a plain percentage yields `None`.
pub fn mirror_percentage(component: &str) -> Option<String> {
    let caps = regex!(r"^([+-]?)(\d*)(?:\.(\d+))?%$").captures(component)?;
    let whole = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if whole.len() + fraction.len() > 30 {
        return None;
    }

    let scale = 10i128.checked_pow(fraction.len() as u32)?;
    let whole_value: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction_value: i128 = if fraction.is_empty() { 0 } else { fraction.parse().ok()? };
    let mut value = whole_value.checked_mul(scale)?.checked_add(fraction_value)?;
    if &caps[1] == "-" {
        value = -value;
    }

    let mirrored = (100 * scale).checked_sub(value)?;
    let sign = match (mirrored < 0, &caps[1]) {
        (true, _) => "-",
        (false, "+") => "+",
        _ => "",
    };
    let magnitude = mirrored.abs();
    let out = if fraction.is_empty() {
        format!("{sign}{magnitude}%")
    } else {
        format!("{sign}{}.{:0width$}%", magnitude / scale, magnitude % scale, width = fraction.len())
    };
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(value: &str, ranges: &[Range]) -> Vec<String> {
        ranges.iter().map(|r| r.slice(value).to_string()).collect()
    }

    #[test]
    fn swaps_whole_words_only() {
        assert_eq!(swap_words("right").as_deref(), Some("left"));
        assert_eq!(swap_words(".pull-right ").as_deref(), Some(".pull-left "));
        assert_eq!(swap_words("url('arrow-left.png')").as_deref(), Some("url('arrow-right.png')"));
        assert_eq!(swap_words("border-left-width").as_deref(), Some("border-right-width"));
        assert_eq!(swap_words(".copyright "), None);
        assert_eq!(swap_words("url('rights.png')"), None);
        assert_eq!(swap_words("left2 _left leftover"), None);
    }

    #[test]
    fn preserves_case() {
        assert_eq!(mirror_word("left"), "right");
        assert_eq!(mirror_word("Right"), "Left");
        assert_eq!(mirror_word("LEFT"), "RIGHT");
        assert_eq!(mirror_word("RIGHT"), "LEFT");
    }

    #[test]
    fn mixed_case_maps_letter_by_letter() {
        assert_eq!(mirror_word("LeFt"), "RiGht");
        assert_eq!(mirror_word("RiGht"), "LeFt");
        assert_eq!(mirror_word("lEFT"), "rIGHT");
        assert_eq!(mirror_word("rIGHT"), "lEFT");
        // No `left` spelling mirrors back to these.
        assert_eq!(mirror_word("RighT"), "RighT");
        assert_eq!(mirror_word("rigHt"), "rigHt");
    }

    #[test]
    fn comments_are_not_swapped() {
        assert_eq!(swap_words(".pull-left /* left column */ ").as_deref(), Some(".pull-right /* left column */ "));
        assert_eq!(swap_words("/* left */"), None);
        assert_eq!(swap_words("[title=\"/* left */\"]").as_deref(), Some("[title=\"/* right */\"]"));
        assert!(!contains_direction("@import x.css /* left */;"));
        assert_eq!(without_comments("body /* main */ "), "body  ");
    }

    #[test]
    fn segments_values() {
        let value = "url('a.png') 0 0, url(data:image/png;base64,AA) \"left\"";
        let kinds: Vec<_> = segments(value).iter().map(|s| (s.kind, s.range.slice(value).to_string())).collect();
        assert_eq!(
            kinds,
            vec![
                (SegmentKind::Url, "url('a.png')".to_string()),
                (SegmentKind::Plain, " 0 0, ".to_string()),
                (SegmentKind::DataUri, "url(data:image/png;base64,AA)".to_string()),
                (SegmentKind::Plain, " ".to_string()),
                (SegmentKind::Text, "\"left\"".to_string()),
            ]
        );
    }

    #[test]
    fn comments_are_their_own_segments_and_not_components() {
        let value = "1px /* top */ 2px/*x*/3px 4px";
        let comments: Vec<_> =
            segments(value).into_iter().filter(|s| s.kind == SegmentKind::Comment).map(|s| s.range.slice(value)).collect();
        assert_eq!(comments, vec!["/* top */", "/*x*/"]);
        assert_eq!(texts(value, &components(value)), vec!["1px", "2px", "3px", "4px"]);
    }

    #[test]
    fn quoted_data_uri_is_detected() {
        let segs = segments("url( \"DATA:image/svg+xml;utf8,<svg/>\" )");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::DataUri);
    }

    #[test]
    fn splits_components() {
        let value = "url(a b.png)  60% 0,no-repeat !important";
        assert_eq!(texts(value, &components(value)), vec!["url(a b.png)", "60%", "0", ",", "no-repeat", "!important"]);
        let without = without_important(value, components(value));
        assert_eq!(texts(value, &without), vec!["url(a b.png)", "60%", "0", ",", "no-repeat"]);

        let spaced = "1px 2px ! important";
        assert_eq!(texts(spaced, &without_important(spaced, components(spaced))), vec!["1px", "2px"]);
    }

    #[test]
    fn mirrors_percentages() {
        assert_eq!(mirror_percentage("20%").as_deref(), Some("80%"));
        assert_eq!(mirror_percentage("0%").as_deref(), Some("100%"));
        assert_eq!(mirror_percentage("100%").as_deref(), Some("0%"));
        assert_eq!(mirror_percentage("33.3%").as_deref(), Some("66.7%"));
        assert_eq!(mirror_percentage("0.50%").as_deref(), Some("99.50%"));
        assert_eq!(mirror_percentage("-10%").as_deref(), Some("110%"));
        assert_eq!(mirror_percentage("150%").as_deref(), Some("-50%"));
        assert_eq!(mirror_percentage("+20%").as_deref(), Some("+80%"));
        assert_eq!(mirror_percentage("+80%").as_deref(), Some("+20%"));
        assert_eq!(mirror_percentage("+150%").as_deref(), Some("-50%"));
        assert_eq!(mirror_percentage(".5%").as_deref(), Some("99.5%"));
        assert_eq!(mirror_percentage("10px"), None);
        assert_eq!(mirror_percentage("%"), None);
        assert_eq!(mirror_percentage("left"), None);
    }

    #[test]
    fn classifies_positions() {
        for c in ["left", "CENTER", "0", "10px", "-1.5em", "20%", ".5%"] {
            assert!(is_position(c), "{c}");
        }
        for c in ["no-repeat", "#fff", "url(x)", "/", "red"] {
            assert!(!is_position(c), "{c}");
        }
    }
}
