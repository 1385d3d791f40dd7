use crate::SwapRule;
use crate::engine::SwapSet;
use crate::rules::helpers::{segments, splice, swap_words};

/// Whole-word `left`/`right` swaps in property names and values.
pub fn rules() -> Vec<SwapRule> {
    vec![
        swap_rule! {
            name: "property-words",
            target: Property,
            class: SwapSet::PROPERTIES,
            prod: |property: &str| { swap_words(property) }
        },
        swap_rule! {
            name: "value-words",
            target: Value,
            class: SwapSet::KEYWORDS,
            prod: |value: &str| { swap_value_words(value) }
        },
    ]
}

/// Swap words in the rewritable parts of a value. Quoted strings outside of
/// `url()` and `data:` URIs are kept as written.
pub fn swap_value_words(value: &str) -> Option<String> {
    let replacements: Vec<_> = segments(value)
        .into_iter()
        .filter(|seg| seg.kind.is_rewritable())
        .filter_map(|seg| swap_words(seg.range.slice(value)).map(|s| (seg.range, s)))
        .collect();

    if replacements.is_empty() { None } else { Some(splice(value, &replacements)) }
}
