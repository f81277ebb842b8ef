//! Left-to-right scanner over regex metasyntax
//!
//! This module splits a raw pattern into tokens that already know about
//! backslash escapes, bracket expressions and group introducers. The
//! category rules never look at raw characters for structure; they work
//! on this token stream so escape and class state is decided in one place.

use std::iter::Peekable;
use std::str::CharIndices;

use super::range::MatchRange;

/// Kind of group opened by a `(` introducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// `(?<=`
    PositiveLookbehind,
    /// `(?<!`
    NegativeLookbehind,
    /// `(?=`
    PositiveLookahead,
    /// `(?!`
    NegativeLookahead,
    /// `(?:`
    NonCapturing,
    /// `(?` followed by syntax outside this table: named groups, inline
    /// flags, atomic groups, comments
    Extension,
    /// Bare `(`
    Capturing,
}

impl GroupKind {
    /// Prefixed introducers, longest spelling first
    const PREFIXED: [GroupKind; 5] = [
        GroupKind::PositiveLookbehind,
        GroupKind::NegativeLookbehind,
        GroupKind::PositiveLookahead,
        GroupKind::NegativeLookahead,
        GroupKind::NonCapturing,
    ];

    /// Source spelling of the introducer
    pub fn spelling(&self) -> &'static str {
        match self {
            GroupKind::PositiveLookbehind => "(?<=",
            GroupKind::NegativeLookbehind => "(?<!",
            GroupKind::PositiveLookahead => "(?=",
            GroupKind::NegativeLookahead => "(?!",
            GroupKind::NonCapturing => "(?:",
            GroupKind::Extension => "(?",
            GroupKind::Capturing => "(",
        }
    }

    /// Whether the introducer is one of the lookaround or non-capturing
    /// spellings
    pub fn is_prefixed(&self) -> bool {
        Self::PREFIXED.contains(self)
    }

    /// Match the longest introducer at the start of `text`
    fn at(text: &str) -> Self {
        Self::PREFIXED
            .into_iter()
            .find(|kind| text.starts_with(kind.spelling()))
            .unwrap_or_else(|| {
                if text.starts_with("(?") {
                    GroupKind::Extension
                } else {
                    GroupKind::Capturing
                }
            })
    }
}

/// Classified atomic token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Ordinary scalar outside a class, a stray `]`, or a dangling `\`
    PlainChar,
    /// Backslash together with the scalar it escapes
    EscapedPair,
    /// `[` or `[^`
    ClassOpen { negated: bool },
    /// The `]` that terminates a class
    ClassClose,
    /// Non-structural scalar inside a class
    ClassLiteral,
    /// Group introducer from the `GroupKind` table
    GroupOpen(GroupKind),
    /// `)` outside a class
    GroupClose,
    /// Remaining metacharacters outside a class (`* + ? { } | . ^ $`)
    Other,
}

/// A token with its byte span in the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: MatchRange,
    /// True when the token was read inside a bracket expression
    pub in_class: bool,
}

impl Token {
    /// Source text of this token
    pub fn text<'a>(&self, pattern: &'a str) -> &'a str {
        pattern.get(self.range.start..self.range.end).unwrap_or("")
    }

    /// The scalar following the backslash of an escape
    pub fn escaped_char(&self, pattern: &str) -> Option<char> {
        match self.kind {
            TokenKind::EscapedPair => self.text(pattern).chars().nth(1),
            _ => None,
        }
    }
}

/// Scanner position relative to bracket expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    /// `at_first_content` holds only right after `[` or `[^`
    InClass { at_first_content: bool },
}

/// Iterator producing the token stream of a pattern
pub struct Scanner<'a> {
    pattern: &'a str,
    chars: Peekable<CharIndices<'a>>,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `pattern`
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.char_indices().peekable(),
            state: ScanState::Outside,
        }
    }

    /// Byte offset of the next unread scalar
    fn offset(&mut self) -> usize {
        let len = self.pattern.len();
        self.chars.peek().map_or(len, |&(pos, _)| pos)
    }

    /// Consume the scalar after a backslash, if any
    fn escape(&mut self) -> TokenKind {
        match self.chars.next() {
            Some(_) => TokenKind::EscapedPair,
            None => TokenKind::PlainChar,
        }
    }

    fn scan_outside(&mut self, start: usize, ch: char) -> TokenKind {
        match ch {
            '\\' => self.escape(),
            '[' => {
                let negated = self.chars.next_if(|&(_, c)| c == '^').is_some();
                self.state = ScanState::InClass { at_first_content: true };
                TokenKind::ClassOpen { negated }
            }
            '(' => {
                let kind = GroupKind::at(&self.pattern[start..]);
                // spellings are ASCII, the `(` is already consumed
                for _ in 1..kind.spelling().len() {
                    self.chars.next();
                }
                TokenKind::GroupOpen(kind)
            }
            ')' => TokenKind::GroupClose,
            '*' | '+' | '?' | '{' | '}' | '|' | '.' | '^' | '$' => TokenKind::Other,
            _ => TokenKind::PlainChar,
        }
    }

    fn scan_in_class(&mut self, ch: char, at_first_content: bool) -> TokenKind {
        match ch {
            ']' if !at_first_content => {
                self.state = ScanState::Outside;
                TokenKind::ClassClose
            }
            '\\' => {
                self.state = ScanState::InClass { at_first_content: false };
                self.escape()
            }
            _ => {
                self.state = ScanState::InClass { at_first_content: false };
                TokenKind::ClassLiteral
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (start, ch) = self.chars.next()?;
        let (kind, in_class) = match self.state {
            ScanState::Outside => (self.scan_outside(start, ch), false),
            ScanState::InClass { at_first_content } => {
                (self.scan_in_class(ch, at_first_content), true)
            }
        };
        let end = self.offset();

        Some(Token {
            kind,
            range: MatchRange::new(start, end),
            in_class,
        })
    }
}

/// Scan a whole pattern into tokens
pub fn tokenize(pattern: &str) -> Vec<Token> {
    Scanner::new(pattern).collect()
}
