//! Layered highlighting of regex patterns
//!
//! Classified ranges overlap by design. The highlighter paints them onto
//! a per-byte layer in `SyntaxCategory::PAINT_ORDER`, later categories on
//! top, and coalesces the layer into non-overlapping styled spans.

use std::collections::HashMap;

use super::category::SyntaxCategory;
use super::range::MatchRange;
use super::rules::classify_tokens;
use super::scanner::{tokenize, Token, TokenKind};
use super::style::{Span, Style};

/// Style for each syntax category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// Overrides; missing categories use their default style
    styles: HashMap<SyntaxCategory, Style>,
}

impl Theme {
    /// Get the style for a category
    pub fn style(&self, category: SyntaxCategory) -> Style {
        self.styles
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_style())
    }

    /// Override the style for a category
    pub fn set_style(&mut self, category: SyntaxCategory, style: Style) {
        self.styles.insert(category, style);
    }
}

/// Turns patterns into styled spans
#[derive(Debug, Clone)]
pub struct Highlighter {
    theme: Theme,
    /// Enabled categories
    categories: Vec<SyntaxCategory>,
}

impl Highlighter {
    /// Create a highlighter with every category enabled
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            categories: SyntaxCategory::ALL.to_vec(),
        }
    }

    /// Builder: restrict highlighting to `categories`
    pub fn with_categories(mut self, categories: &[SyntaxCategory]) -> Self {
        self.categories = categories.to_vec();
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Enabled categories, in declaration order
    pub fn categories(&self) -> Vec<SyntaxCategory> {
        SyntaxCategory::ALL
            .into_iter()
            .filter(|c| self.categories.contains(c))
            .collect()
    }

    /// Ranges of each enabled category, in paint order
    pub fn layers(&self, pattern: &str) -> Vec<(SyntaxCategory, Vec<MatchRange>)> {
        let tokens = tokenize(pattern);
        self.layers_from_tokens(pattern, &tokens)
    }

    fn layers_from_tokens(
        &self,
        pattern: &str,
        tokens: &[Token],
    ) -> Vec<(SyntaxCategory, Vec<MatchRange>)> {
        SyntaxCategory::PAINT_ORDER
            .into_iter()
            .filter(|c| self.categories.contains(c))
            .map(|c| (c, classify_tokens(pattern, tokens, c)))
            .collect()
    }

    /// Highlight a pattern
    ///
    /// Returns non-overlapping spans ordered by start. Unstyled bytes get
    /// no span.
    pub fn highlight(&self, pattern: &str) -> Vec<Span> {
        let tokens = tokenize(pattern);
        coalesce(&self.paint(pattern, &tokens))
    }

    /// Highlight a pattern and reverse the parenthesis pair at `offset`
    ///
    /// Falls back to `highlight` when `offset` is not on a group
    /// parenthesis with a partner.
    pub fn highlight_with_paren(&self, pattern: &str, offset: usize) -> Vec<Span> {
        let tokens = tokenize(pattern);
        let mut layer = self.paint(pattern, &tokens);

        if let Some(partner) = paren_partner(&tokens, offset) {
            for pos in [offset, partner] {
                if let Some(slot) = layer.get_mut(pos) {
                    *slot = Some(slot.unwrap_or_default().with_reverse());
                }
            }
        }

        coalesce(&layer)
    }

    /// Find the parenthesis paired with the one at byte `offset`
    ///
    /// Only group parentheses pair: escaped ones and those inside a
    /// bracket expression are ignored.
    pub fn matching_paren(pattern: &str, offset: usize) -> Option<usize> {
        paren_partner(&tokenize(pattern), offset)
    }

    fn paint(&self, pattern: &str, tokens: &[Token]) -> Vec<Option<Style>> {
        let mut layer = vec![None; pattern.len()];

        for (category, ranges) in self.layers_from_tokens(pattern, tokens) {
            let style = self.theme.style(category);
            for range in ranges {
                if let Some(slots) = layer.get_mut(range.start..range.end) {
                    slots.fill(Some(style));
                }
            }
        }

        layer
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

fn paren_partner(tokens: &[Token], offset: usize) -> Option<usize> {
    let mut open = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::GroupOpen(_) => open.push(token.range.start),
            TokenKind::GroupClose => {
                let close = token.range.start;
                match open.pop() {
                    Some(start) if start == offset => return Some(close),
                    Some(start) if close == offset => return Some(start),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    None
}

/// Merge runs of equally styled bytes into spans
fn coalesce(layer: &[Option<Style>]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut run_start = 0;

    for pos in 1..=layer.len() {
        if pos < layer.len() && layer[pos] == layer[run_start] {
            continue;
        }
        if let Some(style) = layer[run_start] {
            spans.push(Span::new(run_start, pos, style));
        }
        run_start = pos;
    }

    spans
}

/// Caches the spans of the last highlighted pattern
///
/// Spans are re-derived only when the pattern text changes.
#[derive(Debug, Default)]
pub struct HighlightCache {
    pattern: Option<String>,
    spans: Vec<Span>,
}

impl HighlightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the spans of `pattern` are already cached
    pub fn is_cached(&self, pattern: &str) -> bool {
        self.pattern.as_deref() == Some(pattern)
    }

    /// Get spans for `pattern`, recomputing if it changed
    pub fn spans(&mut self, highlighter: &Highlighter, pattern: &str) -> &[Span] {
        if !self.is_cached(pattern) {
            self.spans = highlighter.highlight(pattern);
            self.pattern = Some(pattern.to_string());
        }
        &self.spans
    }

    /// Forget the cached pattern (e.g. after the theme changed)
    pub fn invalidate(&mut self) {
        self.pattern = None;
        self.spans.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Color;
    use pretty_assertions::assert_eq;

    fn style(category: SyntaxCategory) -> Style {
        category.default_style()
    }

    #[test]
    fn test_character_paints_over_symbol() {
        let spans = Highlighter::default().highlight("[abc]");
        assert_eq!(
            spans,
            vec![
                Span::new(0, 1, style(SyntaxCategory::Symbol)),
                Span::new(1, 4, style(SyntaxCategory::Character)),
                Span::new(4, 5, style(SyntaxCategory::Symbol)),
            ]
        );
    }

    #[test]
    fn test_unstyled_bytes_have_no_span() {
        let spans = Highlighter::default().highlight("ab(c)");
        assert_eq!(
            spans,
            vec![
                Span::new(2, 3, style(SyntaxCategory::Symbol)),
                Span::new(4, 5, style(SyntaxCategory::Symbol)),
            ]
        );
        assert!(Highlighter::default().highlight("plain").is_empty());
        assert!(Highlighter::default().highlight("").is_empty());
    }

    #[test]
    fn test_back_reference_paints_over_escape() {
        let spans = Highlighter::default().highlight(r"\1");
        assert_eq!(spans, vec![Span::new(0, 2, style(SyntaxCategory::BackReference))]);
    }

    #[test]
    fn test_disabled_categories() {
        let highlighter = Highlighter::default().with_categories(&[SyntaxCategory::Character]);
        let spans = highlighter.highlight("[a]*");
        assert_eq!(spans, vec![Span::new(1, 2, style(SyntaxCategory::Character))]);
        assert_eq!(highlighter.categories(), vec![SyntaxCategory::Character]);
    }

    #[test]
    fn test_layers_in_paint_order() {
        let layers = Highlighter::default().layers("a+");
        let order: Vec<_> = layers.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, SyntaxCategory::PAINT_ORDER.to_vec());
        let quantifier = layers.iter().find(|(c, _)| *c == SyntaxCategory::Quantifier);
        assert_eq!(quantifier.map(|(_, r)| r.clone()), Some(vec![MatchRange::new(1, 2)]));
    }

    #[test]
    fn test_theme_override() {
        let mut theme = Theme::default();
        theme.set_style(SyntaxCategory::Symbol, Style::fg(Color::Blue));
        assert_eq!(theme.style(SyntaxCategory::Symbol), Style::fg(Color::Blue));
        assert_eq!(
            theme.style(SyntaxCategory::Character),
            SyntaxCategory::Character.default_style()
        );

        let spans = Highlighter::new(theme).highlight("()");
        assert_eq!(spans, vec![Span::new(0, 2, Style::fg(Color::Blue))]);
    }

    #[test]
    fn test_multibyte_spans_on_char_boundaries() {
        let pattern = "[é]ü";
        for span in Highlighter::default().highlight(pattern) {
            assert!(pattern.is_char_boundary(span.start));
            assert!(pattern.is_char_boundary(span.end));
        }
    }

    #[test]
    fn test_matching_paren() {
        let pattern = r"(a(?:b)\(c[)])";
        assert_eq!(Highlighter::matching_paren(pattern, 0), Some(13));
        assert_eq!(Highlighter::matching_paren(pattern, 13), Some(0));
        assert_eq!(Highlighter::matching_paren(pattern, 2), Some(6));
        assert_eq!(Highlighter::matching_paren(pattern, 6), Some(2));
        // escaped and in-class parens never pair
        assert_eq!(Highlighter::matching_paren(pattern, 8), None);
        assert_eq!(Highlighter::matching_paren(pattern, 11), None);
        assert_eq!(Highlighter::matching_paren(pattern, 1), None);
    }

    #[test]
    fn test_matching_paren_unbalanced() {
        assert_eq!(Highlighter::matching_paren("((a)", 0), None);
        assert_eq!(Highlighter::matching_paren("((a)", 1), Some(3));
        assert_eq!(Highlighter::matching_paren("a))", 1), None);
    }

    #[test]
    fn test_highlight_with_paren() {
        let highlighter = Highlighter::default();
        let symbol = style(SyntaxCategory::Symbol);
        let spans = highlighter.highlight_with_paren("(a)", 2);
        assert_eq!(
            spans,
            vec![
                Span::new(0, 1, symbol.with_reverse()),
                Span::new(2, 3, symbol.with_reverse()),
            ]
        );
        assert_eq!(highlighter.highlight_with_paren("(a)", 1), highlighter.highlight("(a)"));
    }

    #[test]
    fn test_cache_reuses_spans() {
        let highlighter = Highlighter::default();
        let mut cache = HighlightCache::new();
        assert!(!cache.is_cached("[a]"));

        let first = cache.spans(&highlighter, "[a]").to_vec();
        assert!(cache.is_cached("[a]"));
        assert_eq!(first, highlighter.highlight("[a]"));

        let second = cache.spans(&highlighter, "(b)").to_vec();
        assert!(!cache.is_cached("[a]"));
        assert_eq!(second, highlighter.highlight("(b)"));

        cache.invalidate();
        assert!(!cache.is_cached("(b)"));
    }
}
