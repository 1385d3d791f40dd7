//! The directional swap rule table.
//!
//! Rules are applied in the order returned by [`get`]: property-name swaps
//! first, then value keywords, then the positional rewrites (box shorthands and
//! background offsets). Each production is an involution, which is what makes
//! flipping a stylesheet twice return the original text.

pub(crate) mod background;
pub(crate) mod helpers;
pub(crate) mod shorthand;
pub(crate) mod words;


use crate::SwapRule;

/// Build the full rule list.
pub(crate) fn get() -> Vec<SwapRule> {
    let mut rules = Vec::new();
    rules.extend(words::rules());
    rules.extend(shorthand::rules());
    rules.extend(background::rules());
    rules
}
