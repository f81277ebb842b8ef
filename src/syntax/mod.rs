//! Regex syntax classification
//!
//! This module provides:
//! - A scanner over regex metasyntax (escapes, bracket expressions, groups)
//! - Per-category sub-rules reporting possibly overlapping ranges
//! - Layered highlighting of those ranges into styled spans

mod category;
mod highlighter;
mod range;
mod rules;
mod scanner;
mod style;

pub use category::SyntaxCategory;
pub use highlighter::{HighlightCache, Highlighter, Theme};
pub use range::MatchRange;
pub use rules::classify;
pub use scanner::{tokenize, GroupKind, Scanner, Token, TokenKind};
pub use style::{Color, Span, Style};
