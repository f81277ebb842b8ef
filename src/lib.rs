//! regex-tint - color-coding for regular-expression patterns
//!
//! The core is [`syntax::classify`]: given a pattern and a
//! [`SyntaxCategory`], it returns the byte ranges of the pattern playing
//! that syntactic role. Ranges may overlap; [`Highlighter`] layers them
//! into styled spans for display.

pub mod config;
pub mod error;
pub mod syntax;
pub mod terminal;

pub use syntax::{classify, Highlighter, MatchRange, SyntaxCategory};
