//! regex-tint - print regular-expression patterns color-coded by syntax

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use regex_tint::config::Config;
use regex_tint::error::{Result, TintError};
use regex_tint::syntax::{HighlightCache, Highlighter, SyntaxCategory};
use regex_tint::terminal::{marker_line, Painter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// What the command line asks for
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Run(Options),
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Only these categories (empty = from config)
    categories: Vec<SyntaxCategory>,
    list_ranges: bool,
    utf16: bool,
    paren: Option<usize>,
    no_color: bool,
    config_path: Option<PathBuf>,
    patterns: Vec<String>,
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args)? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: ignoring config file: {}", e);
            Config::default()
        }),
    };
    if !options.categories.is_empty() {
        config.categories = options.categories.clone();
    }
    let highlighter = config.highlighter();

    let stdout = io::stdout();
    let color = !options.no_color && stdout.is_terminal();
    let mut painter = Painter::new(stdout.lock(), color);
    let mut cache = HighlightCache::new();

    if options.patterns.is_empty() {
        show_lines(io::stdin().lock(), &mut painter, &highlighter, &mut cache, &options)?;
    } else {
        for pattern in &options.patterns {
            show(&mut painter, &highlighter, &mut cache, &options, pattern)?;
        }
    }

    painter.flush()
}

/// Print every line of `input` as a pattern
///
/// Lines are decoded lossily; invalid UTF-8 shows up as U+FFFD.
fn show_lines<R: BufRead, W: Write>(
    mut input: R,
    painter: &mut Painter<W>,
    highlighter: &Highlighter,
    cache: &mut HighlightCache,
    options: &Options,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        let pattern = line.trim_end_matches(['\n', '\r']);
        show(painter, highlighter, cache, options, pattern)?;
    }
}

/// Print one pattern, painted or as a range listing
fn show<W: Write>(
    painter: &mut Painter<W>,
    highlighter: &Highlighter,
    cache: &mut HighlightCache,
    options: &Options,
    pattern: &str,
) -> Result<()> {
    if options.list_ranges {
        return list_ranges(painter, highlighter, options.utf16, pattern);
    }

    match options.paren {
        Some(offset) => {
            let spans = highlighter.highlight_with_paren(pattern, offset);
            painter.write_spans(pattern, &spans)
        }
        None => {
            let spans = cache.spans(highlighter, pattern);
            painter.write_spans(pattern, spans)
        }
    }
}

fn list_ranges<W: Write>(
    painter: &mut Painter<W>,
    highlighter: &Highlighter,
    utf16: bool,
    pattern: &str,
) -> Result<()> {
    painter.write_str(&format!("{}\n", pattern))?;

    for category in highlighter.categories() {
        let ranges = category.ranges(pattern);
        if ranges.is_empty() {
            continue;
        }

        let listed: Vec<String> = ranges
            .iter()
            .map(|range| {
                let (location, length) = if utf16 {
                    range.to_utf16(pattern).unwrap_or((range.start, range.len()))
                } else {
                    (range.start, range.len())
                };
                format!("({},{})", location, length)
            })
            .collect();
        painter.write_str(&format!("{:<15}{}\n", category.name(), listed.join(" ")))?;

        let style = highlighter.theme().style(category);
        for range in &ranges {
            painter.apply_style(&style)?;
            painter.write_str(&marker_line(pattern, *range))?;
            painter.reset_attributes()?;
            painter.write_str("\n")?;
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--category" | "-c" => {
                let name = expect_value(&mut iter, arg)?;
                let category = SyntaxCategory::from_name(name)
                    .ok_or_else(|| TintError::UnknownCategory(name.clone()))?;
                options.categories.push(category);
            }
            "--ranges" | "-r" => options.list_ranges = true,
            "--utf16" => options.utf16 = true,
            "--paren" | "-p" => {
                let value = expect_value(&mut iter, arg)?;
                let offset = value.parse().map_err(|_| {
                    TintError::InvalidArgument(format!("{}: not a byte offset: {}", arg, value))
                })?;
                options.paren = Some(offset);
            }
            "--no-color" => options.no_color = true,
            "--config" => {
                let path = expect_value(&mut iter, arg)?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--" => {
                options.patterns.extend(iter.by_ref().cloned());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(TintError::InvalidArgument(format!("unknown option: {}", flag)));
            }
            _ => options.patterns.push(arg.clone()),
        }
    }

    Ok(Command::Run(options))
}

fn expect_value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a String> {
    iter.next()
        .ok_or_else(|| TintError::InvalidArgument(format!("{} requires a value", flag)))
}

fn print_usage() {
    println!("regex-tint {} - color-code regular expressions", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: regex-tint [OPTIONS] [PATTERN...]");
    println!();
    println!("Reads one pattern per line from stdin when no PATTERN is given.");
    println!();
    println!("Options:");
    println!("  -c, --category NAME  Only highlight NAME (repeatable):");
    println!("                       character, back-reference, symbol, quantifier, anchor");
    println!("  -r, --ranges         List classified ranges instead of painting");
    println!("      --utf16          Report ranges in UTF-16 code units (with --ranges)");
    println!("  -p, --paren OFFSET   Also highlight the parenthesis pair at byte OFFSET");
    println!("      --no-color       Disable ANSI styling");
    println!("      --config PATH    Read settings from PATH instead of ~/.regex-tint.toml");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
}

fn print_version() {
    println!("regex-tint {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn options(list: &[&str]) -> Options {
        match parse_args(&args(list)).unwrap() {
            Command::Run(options) => options,
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Command::Help);
        assert_eq!(parse_args(&args(&["x", "--version"])).unwrap(), Command::Version);
    }

    #[test]
    fn test_parse_options() {
        let opts = options(&["-c", "symbol", "--category", "anchor", "-r", "--utf16", "[a]", "b"]);
        assert_eq!(opts.categories, vec![SyntaxCategory::Symbol, SyntaxCategory::Anchor]);
        assert!(opts.list_ranges);
        assert!(opts.utf16);
        assert_eq!(opts.patterns, vec!["[a]".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_paren_and_config() {
        let opts = options(&["-p", "3", "--config", "/tmp/tint.toml", "--no-color"]);
        assert_eq!(opts.paren, Some(3));
        assert_eq!(opts.config_path, Some(PathBuf::from("/tmp/tint.toml")));
        assert!(opts.no_color);
        assert!(opts.patterns.is_empty());
    }

    #[test]
    fn test_patterns_after_double_dash() {
        let opts = options(&["--", "-r", "^a$"]);
        assert!(!opts.list_ranges);
        assert_eq!(opts.patterns, vec!["-r".to_string(), "^a$".to_string()]);
        // a lone dash is a pattern, not an option
        assert_eq!(options(&["-"]).patterns, vec!["-".to_string()]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_args(&args(&["-c", "keyword"])),
            Err(TintError::UnknownCategory(_))
        ));
        assert!(matches!(parse_args(&args(&["-c"])), Err(TintError::InvalidArgument(_))));
        assert!(matches!(
            parse_args(&args(&["-p", "x"])),
            Err(TintError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_args(&args(&["--bogus"])),
            Err(TintError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_list_ranges_output() {
        let highlighter = Highlighter::default().with_categories(&[
            SyntaxCategory::Character,
            SyntaxCategory::Symbol,
        ]);
        let mut painter = Painter::new(Vec::new(), false);
        list_ranges(&mut painter, &highlighter, false, "[abc]").unwrap();
        let output = String::from_utf8(painter.into_inner()).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[abc]",
                "character      (1,3)",
                " ^^^",
                "symbol         (0,5)",
                "^^^^^",
            ]
        );
    }

    #[test]
    fn test_list_ranges_utf16() {
        let highlighter = Highlighter::default().with_categories(&[SyntaxCategory::Character]);
        let mut painter = Painter::new(Vec::new(), false);
        list_ranges(&mut painter, &highlighter, true, "é[ü]").unwrap();
        let output = String::from_utf8(painter.into_inner()).unwrap();
        assert!(output.contains("character      (2,1)"));
    }

    #[test]
    fn test_show_lines_survives_invalid_utf8() {
        let highlighter = Highlighter::default();
        let mut cache = HighlightCache::new();
        let input: &[u8] = b"[a]\r\n\xff(b)\nc+";
        let mut painter = Painter::new(Vec::new(), false);
        show_lines(input, &mut painter, &highlighter, &mut cache, &Options::default()).unwrap();
        let output = String::from_utf8(painter.into_inner()).unwrap();
        assert_eq!(output, "[a]\n\u{fffd}(b)\nc+\n");
        assert!(cache.is_cached("c+"));
    }

    #[test]
    fn test_show_with_paren() {
        let highlighter = Highlighter::default();
        let mut cache = HighlightCache::new();
        let opts = Options {
            paren: Some(0),
            ..Options::default()
        };
        let mut painter = Painter::new(Vec::new(), false);
        show(&mut painter, &highlighter, &mut cache, &opts, "(a)").unwrap();
        assert_eq!(String::from_utf8(painter.into_inner()).unwrap(), "(a)\n");
        // the paren path does not fill the cache
        assert!(!cache.is_cached("(a)"));
    }
}
