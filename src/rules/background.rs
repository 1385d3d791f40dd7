use crate::SwapRule;
use crate::engine::SwapSet;
use crate::rules::helpers::{components, is_position, mirror_percentage, splice};

/// Horizontal background offsets given as percentages.
///
/// Edge keywords (`left`/`right`) are already handled by the word rules; this
/// only deals with `p%` offsets, which are measured from the left edge and
/// become `(100 - p)%`. Lengths are left alone since they need the box width.
pub fn rules() -> Vec<SwapRule> {
    vec![swap_rule! {
        name: "background-position",
        target: Value,
        properties: ["background", "background-position", "background-position-x"],
        class: SwapSet::BACKGROUND_POSITION,
        prod: |value: &str| { mirror_background_position(value) }
    }]
}

/// Mirror the horizontal component of every comma-separated background layer.
///
/// ```text
/// url(a.png) 60% 0 no-repeat, url(b.png) left 20%
///            ^^^ first position component -> 40%
///                                        ^^^^ keyword, no change here
/// ```
pub fn mirror_background_position(value: &str) -> Option<String> {
    let parts = components(value);
    let mut replacements = Vec::new();

    for layer in parts.split(|r| r.slice(value) == ",") {
        let Some(horizontal) = layer.iter().find(|r| is_position(r.slice(value))) else {
            continue;
        };
        if let Some(mirrored) = mirror_percentage(horizontal.slice(value)) {
            if mirrored != horizontal.slice(value) {
                replacements.push((*horizontal, mirrored));
            }
        }
    }

    if replacements.is_empty() { None } else { Some(splice(value, &replacements)) }
}
