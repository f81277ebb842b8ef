//! Syntax categories for regex patterns
//!
//! A category is the kind of syntactic role a span of a pattern can play.
//! Each category owns an ordered set of sub-rules in `rules`.

use super::range::MatchRange;
use super::rules;
use super::style::{Color, Style};

/// Syntactic role of a span within a regex pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxCategory {
    /// Escaped literals and bracket-expression content
    Character,
    /// `\1` to `\9` and `\k<name>`
    BackReference,
    /// Brackets, parentheses and group introducers
    Symbol,
    /// `*`, `+`, `?` and `{n,m}`
    Quantifier,
    /// `^`, `$` and escaped anchors such as `\b`
    Anchor,
}

impl SyntaxCategory {
    /// All categories in declaration order
    pub const ALL: [SyntaxCategory; 5] = [
        SyntaxCategory::Character,
        SyntaxCategory::BackReference,
        SyntaxCategory::Symbol,
        SyntaxCategory::Quantifier,
        SyntaxCategory::Anchor,
    ];

    /// Order in which categories are layered; later ones paint on top
    ///
    /// `Character` follows `Symbol`; escape-based categories follow `Character`.
    pub const PAINT_ORDER: [SyntaxCategory; 5] = [
        SyntaxCategory::Symbol,
        SyntaxCategory::Character,
        SyntaxCategory::Quantifier,
        SyntaxCategory::Anchor,
        SyntaxCategory::BackReference,
    ];

    /// Ranges of `pattern` belonging to this category
    pub fn ranges(self, pattern: &str) -> Vec<MatchRange> {
        rules::classify(pattern, self)
    }

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            SyntaxCategory::Character => Style::fg(Color::Green),
            SyntaxCategory::BackReference => Style::fg(Color::BrightCyan).with_underline(),
            SyntaxCategory::Symbol => Style::fg(Color::Magenta).with_bold(),
            SyntaxCategory::Quantifier => Style::fg(Color::Yellow),
            SyntaxCategory::Anchor => Style::fg(Color::BrightRed),
        }
    }

    /// Name used in config files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            SyntaxCategory::Character => "character",
            SyntaxCategory::BackReference => "back-reference",
            SyntaxCategory::Symbol => "symbol",
            SyntaxCategory::Quantifier => "quantifier",
            SyntaxCategory::Anchor => "anchor",
        }
    }

    /// Parse a category from its name, ignoring case and `-`/`_`
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "character" => Some(SyntaxCategory::Character),
            "backreference" => Some(SyntaxCategory::BackReference),
            "symbol" => Some(SyntaxCategory::Symbol),
            "quantifier" => Some(SyntaxCategory::Quantifier),
            "anchor" => Some(SyntaxCategory::Anchor),
            _ => None,
        }
    }
}
