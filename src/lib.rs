extern crate self as flipcss;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;

pub use api::{FlipResult, Options, Warning, clean, clean_with, flip, flip_with};
pub use engine::SwapSet;
pub use error::{Error, Result};

use std::fmt;
use std::str::FromStr;

// --- Direction ---------------------------------------------------------------

/// Writing direction of a stylesheet.
///
/// Only the two lowercase literals `"ltr"` and `"rtl"` parse; anything else is
/// rejected with [`Error::InvalidDirection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// The mirrored direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Internal types ----------------------------------------------------------

/// Byte span into the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Range { start, end }
    }

    pub(crate) fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }

    pub(crate) fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

/// A contiguous region of the input produced by the scanner.
///
/// Concatenating the ranges of every token, in order, yields the input back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Prelude of a block, up to (not including) its `{`.
    Selector,
    BlockOpen,
    BlockClose,
    /// `property: value` with the terminating `;` when present.
    Declaration(DeclarationParts),
    Comment,
    Whitespace,
    /// Anything the scanner does not recognize (at-rule statements, stray `;`).
    Other,
}

/// Sub-spans of a declaration token. Both ranges are trimmed of surrounding
/// whitespace and index into the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeclarationParts {
    pub property: Range,
    pub value: Range,
    pub important: bool,
}

// --- Swap rules --------------------------------------------------------------

/// Which part of a declaration a rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    Property,
    Value,
}

/// Rewrites one property name or value. Returns `None` when nothing changes.
pub(crate) type Production = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A directional transformation: a name, the declaration part it targets, the
/// properties it is limited to (empty means any property) and a `production`
/// that rewrites the text of that part.
///
/// Every production is an involution: applying it to its own output gives the
/// original text back.
pub(crate) struct SwapRule {
    pub name: &'static str,
    pub target: Target,
    /// Lowercase property names this rule applies to; empty = all.
    pub properties: &'static [&'static str],
    /// Swap class used to enable/disable the rule through [`Options`].
    pub class: SwapSet,
    pub production: Production,
}

impl SwapRule {
    /// Whether this rule handles declarations of `property`.
    pub(crate) fn applies_to(&self, property: &str) -> bool {
        self.properties.is_empty() || self.properties.iter().any(|p| p.eq_ignore_ascii_case(property))
    }
}

impl std::fmt::Debug for SwapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("properties", &self.properties)
            .field("class", &self.class)
            .field("production", &"<function>")
            .finish()
    }
}
