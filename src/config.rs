//! Configuration file support
//!
//! Loads settings from ~/.regex-tint.toml (or %USERPROFILE%\.regex-tint.toml
//! on Windows)
//!
//! Example:
//! ```text
//! # categories to highlight (default: all)
//! categories = ["symbol", "character", "quantifier"]
//!
//! [colors.symbol]
//! fg = "magenta"
//! bold = true
//!
//! [colors.character]
//! fg = "bright-green"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{Result, TintError};
use crate::syntax::{Color, Highlighter, Style, SyntaxCategory, Theme};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    /// Categories to highlight
    pub categories: Vec<SyntaxCategory>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            categories: SyntaxCategory::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".regex-tint.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".regex-tint.toml"))
        }
    }

    /// Load the user config, or defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();

        if let Some(value) = table.get("categories") {
            config.categories = parse_categories(value)?;
        }

        if let Some(value) = table.get("colors") {
            let colors = value
                .as_table()
                .ok_or_else(|| TintError::InvalidConfig("`colors` must be a table".into()))?;
            for (name, entry) in colors {
                let category = SyntaxCategory::from_name(name)
                    .ok_or_else(|| TintError::UnknownCategory(name.clone()))?;
                let style = parse_style(category, entry)?;
                config.theme.set_style(category, style);
            }
        }

        Ok(config)
    }

    /// Build a highlighter from these settings
    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.theme.clone()).with_categories(&self.categories)
    }
}

fn parse_categories(value: &Value) -> Result<Vec<SyntaxCategory>> {
    let names = value
        .as_array()
        .ok_or_else(|| TintError::InvalidConfig("`categories` must be an array".into()))?;

    names
        .iter()
        .map(|name| {
            let name = name.as_str().ok_or_else(|| {
                TintError::InvalidConfig("`categories` entries must be strings".into())
            })?;
            SyntaxCategory::from_name(name).ok_or_else(|| TintError::UnknownCategory(name.into()))
        })
        .collect()
}

/// Parse a `[colors.<category>]` table on top of the category's default style
fn parse_style(category: SyntaxCategory, value: &Value) -> Result<Style> {
    let entry = value.as_table().ok_or_else(|| {
        TintError::InvalidConfig(format!("`colors.{}` must be a table", category.name()))
    })?;
    let mut style = category.default_style();

    for (key, value) in entry {
        match key.as_str() {
            "fg" => style.fg = parse_color(key, value)?,
            "bg" => style.bg = parse_color(key, value)?,
            "bold" => style.bold = parse_flag(key, value)?,
            "italic" => style.italic = parse_flag(key, value)?,
            "underline" => style.underline = parse_flag(key, value)?,
            "reverse" => style.reverse = parse_flag(key, value)?,
            _ => {
                return Err(TintError::InvalidConfig(format!(
                    "unknown style key `{}` for {}",
                    key,
                    category.name()
                )))
            }
        }
    }

    Ok(style)
}

fn parse_color(key: &str, value: &Value) -> Result<Color> {
    let name = value
        .as_str()
        .ok_or_else(|| TintError::InvalidConfig(format!("`{}` must be a color name", key)))?;
    Color::from_name(name).ok_or_else(|| TintError::UnknownColor(name.into()))
}

fn parse_flag(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| TintError::InvalidConfig(format!("`{}` must be true or false", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
categories = ["symbol", "Character"]

[colors.symbol]
fg = "bright-blue"
bold = false
underline = true

[colors.back-reference]
bg = "black"
        "#;

        let config = Config::parse(contents).unwrap();
        assert_eq!(
            config.categories,
            vec![SyntaxCategory::Symbol, SyntaxCategory::Character]
        );

        let symbol = config.theme.style(SyntaxCategory::Symbol);
        assert_eq!(symbol.fg, Color::BrightBlue);
        assert!(!symbol.bold);
        assert!(symbol.underline);

        // unspecified keys keep the category default
        let back_reference = config.theme.style(SyntaxCategory::BackReference);
        assert_eq!(back_reference.bg, Color::Black);
        assert_eq!(back_reference.fg, SyntaxCategory::BackReference.default_style().fg);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.categories, SyntaxCategory::ALL.to_vec());
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn test_highlighter_uses_categories() {
        let config = Config::parse(r#"categories = ["quantifier"]"#).unwrap();
        let highlighter = config.highlighter();
        assert_eq!(highlighter.categories(), vec![SyntaxCategory::Quantifier]);
        assert_eq!(highlighter.highlight("[a]+").len(), 1);
    }

    #[test]
    fn test_unknown_category() {
        let err = Config::parse(r#"categories = ["keyword"]"#).unwrap_err();
        assert!(matches!(err, TintError::UnknownCategory(name) if name == "keyword"));

        let err = Config::parse("[colors.keyword]\nfg = \"red\"").unwrap_err();
        assert!(matches!(err, TintError::UnknownCategory(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::parse("[colors.symbol]\nfg = \"mauve\"").unwrap_err();
        assert!(matches!(err, TintError::UnknownColor(name) if name == "mauve"));

        let err = Config::parse("[colors.symbol]\nbold = \"yes\"").unwrap_err();
        assert!(matches!(err, TintError::InvalidConfig(_)));

        let err = Config::parse("[colors.symbol]\nblink = true").unwrap_err();
        assert!(matches!(err, TintError::InvalidConfig(_)));

        let err = Config::parse("categories = \"symbol\"").unwrap_err();
        assert!(matches!(err, TintError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::parse("categories = [").unwrap_err();
        assert!(matches!(err, TintError::Toml(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/regex-tint.toml")).unwrap_err();
        assert!(matches!(err, TintError::Io(_)));
    }
}
