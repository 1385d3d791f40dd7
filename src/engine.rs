//! Flip and clean engines.
//!
//! Both engines are pure text-to-text passes over the same substrate:
//!
//! ```text
//! input ── scanner::scan ──> Vec<Token>          (lossless)
//!                │
//!                └─ annotations::resolve ──> Vec<Option<Annotation>>
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            v                                       v
//!      flip::run                               clean::run
//!  CompiledRules (rules table                drop/unmark direction-only
//!  filtered by SwapSet)                      declarations, inject body
//!            │                               `direction`
//!            v                                       v
//!   mirrored text + warnings                   cleaned text
//! ```
//!
//! ## Responsibilities by module
//!
//! - `scanner.rs`: splits CSS into selectors, braces, declarations, comments,
//!   whitespace and other text. Never fails, never loses a byte.
//! - `annotations.rs`: associates `!direction-ignore` / `!ltr-only` /
//!   `!rtl-only` comments with the declaration they trail.
//! - `compiled_rules.rs`: selects the rules enabled by a [`SwapSet`] and
//!   applies them in table order.
//! - `flip.rs`: the mirroring pass and its advisory warnings.
//! - `clean.rs`: the annotation-resolving pre-pass.
//!
//! ## Debugging
//!
//! Both passes emit a `tracing` debug event per run; rule applications are
//! traced at `trace` level. Run the binary with `RUST_LOG=flipcss=trace`.

#[path = "engine/annotations.rs"]
mod annotations;
#[path = "engine/clean.rs"]
mod clean;
#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/flip.rs"]
mod flip;
#[path = "engine/scanner.rs"]
pub(crate) mod scanner;

pub(crate) use compiled_rules::CompiledRules;
pub use compiled_rules::SwapSet;
pub(crate) use flip::FlipRun;

use crate::Direction;

/// Run the flip pass over `input` with an already compiled rule view.
pub(crate) fn flip(input: &str, rules: &CompiledRules<'_>, collect_warnings: bool) -> FlipRun {
    flip::run(input, rules, collect_warnings)
}

/// Run the clean pass over `input` for `direction`.
pub(crate) fn clean(input: &str, direction: Direction) -> String {
    clean::run(input, direction)
}
