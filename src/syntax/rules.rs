//! Per-category sub-rules
//!
//! Every category is an ordered list of independent sub-rules over the
//! token stream. The result for a category is the concatenation of each
//! sub-rule's matches in declaration order. Overlaps and duplicates are
//! kept: callers layer them, they are not a set.

use std::sync::OnceLock;

use regex::Regex;

use super::category::SyntaxCategory;
use super::range::MatchRange;
use super::scanner::{tokenize, Token, TokenKind};

/// A single sub-rule: one linear pass over the tokens
type SubRule = fn(&str, &[Token]) -> Vec<MatchRange>;

const CHARACTER_RULES: &[SubRule] = &[escaped_literals, class_contents];
const BACK_REFERENCE_RULES: &[SubRule] = &[numbered_back_references, named_back_references];
const SYMBOL_RULES: &[SubRule] = &[group_prefixes, open_parens, close_parens, bracket_expressions];
const QUANTIFIER_RULES: &[SubRule] = &[repetition_operators, intervals];
const ANCHOR_RULES: &[SubRule] = &[anchor_operators, escaped_anchors];

/// Classify `pattern` for one category
///
/// Total over every input: malformed patterns give partial results,
/// never an error.
pub fn classify(pattern: &str, category: SyntaxCategory) -> Vec<MatchRange> {
    let tokens = tokenize(pattern);
    classify_tokens(pattern, &tokens, category)
}

/// Classify an already scanned pattern
pub(crate) fn classify_tokens(
    pattern: &str,
    tokens: &[Token],
    category: SyntaxCategory,
) -> Vec<MatchRange> {
    let rules = match category {
        SyntaxCategory::Character => CHARACTER_RULES,
        SyntaxCategory::BackReference => BACK_REFERENCE_RULES,
        SyntaxCategory::Symbol => SYMBOL_RULES,
        SyntaxCategory::Quantifier => QUANTIFIER_RULES,
        SyntaxCategory::Anchor => ANCHOR_RULES,
    };

    rules.iter().flat_map(|rule| rule(pattern, tokens)).collect()
}

// Character

fn escaped_literals(_pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::EscapedPair)
        .map(|t| t.range)
        .collect()
}

/// Interior of each bracket expression, between the opening and closing bracket
fn class_contents(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    let mut content_start = None;

    for token in tokens {
        match token.kind {
            TokenKind::ClassOpen { .. } => content_start = Some(token.range.end),
            TokenKind::ClassClose => {
                if let Some(start) = content_start.take() {
                    ranges.push(MatchRange::new(start, token.range.start));
                }
            }
            _ => {}
        }
    }

    // unterminated class runs to the end
    if let Some(start) = content_start {
        if start < pattern.len() {
            ranges.push(MatchRange::new(start, pattern.len()));
        }
    }

    ranges
}

// Back-reference

fn numbered_back_references(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| !t.in_class)
        .filter(|t| matches!(t.escaped_char(pattern), Some('1'..='9')))
        .map(|t| t.range)
        .collect()
}

fn named_back_references(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    static NAMED: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = NAMED.get_or_init(|| Regex::new(r"\\k<[A-Za-z][A-Za-z0-9]*>").ok());

    anchored_matches(regex.as_ref(), pattern, tokens, |t| {
        t.kind == TokenKind::EscapedPair && !t.in_class
    })
}

// Symbol

fn group_prefixes(_pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::GroupOpen(kind) if kind.is_prefixed()))
        .map(|t| t.range)
        .collect()
}

/// The `(` of every group introducer, on its own
fn open_parens(_pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::GroupOpen(_)))
        .map(|t| MatchRange::with_length(t.range.start, 1))
        .collect()
}

fn close_parens(_pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::GroupClose)
        .map(|t| t.range)
        .collect()
}

/// Whole bracket expressions, from `[` through the terminating `]`
///
/// An unterminated class yields only its opening `[` or `[^`.
fn bracket_expressions(_pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    let mut open: Option<MatchRange> = None;

    for token in tokens {
        match token.kind {
            TokenKind::ClassOpen { .. } => open = Some(token.range),
            TokenKind::ClassClose => {
                if let Some(open) = open.take() {
                    ranges.push(MatchRange::new(open.start, token.range.end));
                }
            }
            _ => {}
        }
    }

    ranges.extend(open);
    ranges
}

// Quantifier

fn repetition_operators(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    other_tokens(pattern, tokens, &["*", "+", "?"])
}

/// `{n}`, `{n,}` and `{n,m}`
fn intervals(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    static INTERVAL: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = INTERVAL.get_or_init(|| Regex::new(r"\{[0-9]+(?:,[0-9]*)?\}").ok());

    anchored_matches(regex.as_ref(), pattern, tokens, |t| t.kind == TokenKind::Other)
}

// Anchor

fn anchor_operators(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    other_tokens(pattern, tokens, &["^", "$"])
}

fn escaped_anchors(pattern: &str, tokens: &[Token]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| !t.in_class)
        .filter(|t| matches!(t.escaped_char(pattern), Some('A' | 'b' | 'B' | 'G' | 'Z' | 'z')))
        .map(|t| t.range)
        .collect()
}

// Helpers

/// `Other` tokens whose text is one of `spellings`
fn other_tokens(pattern: &str, tokens: &[Token], spellings: &[&str]) -> Vec<MatchRange> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Other && spellings.contains(&t.text(pattern)))
        .map(|t| t.range)
        .collect()
}

/// Raw-text regex matches that begin on a token accepted by `accept`
///
/// Keeps escaped or in-class text from matching a rule written against
/// the raw pattern.
fn anchored_matches(
    regex: Option<&Regex>,
    pattern: &str,
    tokens: &[Token],
    accept: impl Fn(&Token) -> bool,
) -> Vec<MatchRange> {
    let Some(regex) = regex else {
        return Vec::new();
    };

    regex
        .find_iter(pattern)
        .filter(|m| {
            tokens
                .binary_search_by_key(&m.start(), |t| t.range.start)
                .map(|idx| accept(&tokens[idx]))
                .unwrap_or(false)
        })
        .map(|m| MatchRange::new(m.start(), m.end()))
        .collect()
}
