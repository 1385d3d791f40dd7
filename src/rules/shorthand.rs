use crate::SwapRule;
use crate::engine::SwapSet;
use crate::rules::helpers::{components, splice, without_important};

/// Four-value box shorthands: `top right bottom left` -> `top left bottom right`.
pub fn rules() -> Vec<SwapRule> {
    vec![swap_rule! {
        name: "box-shorthand",
        target: Value,
        properties: ["margin", "padding", "border-width", "border-style", "border-color"],
        class: SwapSet::SHORTHANDS,
        prod: |value: &str| { swap_box_edges(value) }
    }]
}

/// Swap the 2nd and 4th of exactly four top-level components. Shorter lists
/// already mirror through the shorthand's implicit expansion.
pub fn swap_box_edges(value: &str) -> Option<String> {
    let parts = without_important(value, components(value));
    if parts.len() != 4 || parts.iter().any(|r| r.slice(value) == ",") {
        return None;
    }

    let (right, left) = (parts[1], parts[3]);
    if right.slice(value) == left.slice(value) {
        return None;
    }

    Some(splice(value, &[(right, left.slice(value).to_string()), (left, right.slice(value).to_string())]))
}
