//! Styled terminal output using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, MatchRange, Span, Style};

/// Writes highlighted patterns to any output
pub struct Painter<W: Write> {
    out: W,
    /// Whether to emit ANSI styling
    color: bool,
}

impl<W: Write> Painter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Apply a style to subsequent output
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        if !self.color {
            return Ok(());
        }
        if style.fg != Color::Default {
            queue!(self.out, SetForegroundColor(to_crossterm(style.fg)))?;
        }
        if style.bg != Color::Default {
            queue!(self.out, SetBackgroundColor(to_crossterm(style.bg)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        if self.color {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Write `text` with `spans` applied, followed by a newline
    ///
    /// Spans must be non-overlapping and ordered by start, as returned by
    /// the highlighter.
    pub fn write_spans(&mut self, text: &str, spans: &[Span]) -> Result<()> {
        let mut pos = 0;

        for span in spans {
            if span.start < pos || span.is_empty() {
                continue;
            }
            self.write_str(text.get(pos..span.start).unwrap_or(""))?;
            self.apply_style(&span.style)?;
            self.write_str(text.get(span.start..span.end).unwrap_or(""))?;
            self.reset_attributes()?;
            pos = span.end;
        }

        self.write_str(text.get(pos..).unwrap_or(""))?;
        self.write_str("\n")?;
        Ok(())
    }

    /// Flush output
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}

/// Build a row of `^` under the display columns covered by `range`
///
/// Columns follow terminal display width, so wide characters get two
/// markers and the row lines up under the printed pattern.
pub fn marker_line(text: &str, range: MatchRange) -> String {
    let mut line = String::new();

    for (pos, ch) in text.char_indices() {
        if pos >= range.end {
            break;
        }
        let width = UnicodeWidthChar::width(ch).unwrap_or(1);
        let fill = if range.contains(pos) { '^' } else { ' ' };
        line.extend(std::iter::repeat(fill).take(width));
    }

    line
}
