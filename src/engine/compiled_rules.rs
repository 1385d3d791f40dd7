//! Rule selection and indexing.
//!
//! The rule table (`crate::rules::get`) is static; a run only needs the subset
//! enabled by its [`SwapSet`], split by the declaration part each rule
//! rewrites. `CompiledRules` is that cheap per-run view.
//!
//! ## Invariants
//!
//! - Rules keep their table order inside each list; the flip engine relies on
//!   property rules running before value rules, and on value rules running in
//!   table order (words, shorthands, background offsets).

use crate::{SwapRule, Target};

bitflags::bitflags! {
    /// Classes of directional rewrites that can be switched on or off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SwapSet: u8 {
        /// `margin-left` -> `margin-right` and other property names.
        const PROPERTIES          = 1 << 0;
        /// `left`/`right` words inside values.
        const KEYWORDS            = 1 << 1;
        /// `left`/`right` words inside selectors (`.pull-right`).
        const SELECTORS           = 1 << 2;
        /// Four-value `margin`/`padding`/`border-*` lists.
        const SHORTHANDS          = 1 << 3;
        /// Percentage offsets in `background`/`background-position`.
        const BACKGROUND_POSITION = 1 << 4;
    }
}

impl Default for SwapSet {
    fn default() -> Self {
        SwapSet::all()
    }
}

/// The enabled rules for one run, grouped by target.
#[derive(Debug)]
pub(crate) struct CompiledRules<'a> {
    pub property_rules: Vec<&'a SwapRule>,
    pub value_rules: Vec<&'a SwapRule>,
    pub swaps: SwapSet,
}

impl<'a> CompiledRules<'a> {
    /// Select the rules of `rules` whose class is in `swaps`.
    pub fn new(rules: &'a [SwapRule], swaps: SwapSet) -> Self {
        let mut property_rules = Vec::new();
        let mut value_rules = Vec::new();

        for rule in rules.iter().filter(|r| swaps.intersects(r.class)) {
            match rule.target {
                Target::Property => property_rules.push(rule),
                Target::Value => value_rules.push(rule),
            }
        }

        CompiledRules { property_rules, value_rules, swaps }
    }

    /// Apply every rule for `target` in order. `property` is the declaration's
    /// property name as written, used to scope property-specific rules.
    ///
    /// Returns `None` when no rule changed the text.
    pub fn rewrite(&self, target: Target, property: &str, text: &str) -> Option<String> {
        let rules = match target {
            Target::Property => &self.property_rules,
            Target::Value => &self.value_rules,
        };

        let mut current: Option<String> = None;
        for rule in rules.iter().filter(|r| r.applies_to(property)) {
            let input = current.as_deref().unwrap_or(text);
            if let Some(next) = (rule.production)(input) {
                tracing::trace!(rule = rule.name, property, from = input, to = next.as_str(), "rule applied");
                current = Some(next);
            }
        }
        current
    }
}
