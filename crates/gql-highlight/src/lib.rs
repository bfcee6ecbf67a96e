//! Syntax highlighting and terminal colors for gql.
//!
//! JSON and TOML output is highlighted with syntect. Filter expressions are colored from
//! the gql token stream, and parse errors get a colored caret display.

#![warn(missing_docs)]

use gql_query::{ContextPart, SyntaxError, TokenKind, tokenize};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Highlights structured text for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Available color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights compiled JSON.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights configuration TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights `content` using the syntax registered for `syntax_name`.
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut lines = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text.
    pub const RED: &str = "\x1b[31m";
    /// Magenta text.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given color codes.
fn paint(codes: &str, text: &str) -> String {
    format!("{codes}{text}{}", colors::RESET)
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Formats text as dimmed.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Formats text as an error (red).
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Color used for a token kind, or `None` to leave it plain.
fn token_color(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Property(_) => Some(colors::CYAN),
        TokenKind::Dash | TokenKind::Comparator(_) => Some(colors::YELLOW),
        TokenKind::Plus | TokenKind::Comma => Some(colors::MAGENTA),
        TokenKind::String(_) => Some(colors::GREEN),
        TokenKind::Number(_) | TokenKind::Bool(_) | TokenKind::Null => Some(colors::BOLD),
        TokenKind::Colon
        | TokenKind::LBracket
        | TokenKind::RBracket
        | TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::Bareword(_) => None,
    }
}

/// Colors a filter expression by token kind.
///
/// Whitespace is kept as written. Input that does not lex is returned unchanged.
pub fn highlight_filter(input: &str) -> String {
    let Ok(tokens) = tokenize(input) else {
        return input.to_string();
    };
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::new();
    let mut cursor = 0;

    for token in tokens {
        output.extend(chars.get(cursor..token.position).into_iter().flatten());
        match token_color(&token.kind) {
            Some(color) => output.push_str(&paint(color, &token.text)),
            None => output.push_str(&token.text),
        }
        cursor = token.position + token.text.chars().count();
    }
    output.extend(chars.get(cursor..).into_iter().flatten());
    output
}

/// Renders a parse error with the filter and a red caret under the failing character.
pub fn error_context(err: &SyntaxError) -> String {
    err.render_context(|part, text| match part {
        ContextPart::Message => error(text),
        ContextPart::Caret => paint(&format!("{}{}", colors::BOLD, colors::RED), text),
        ContextPart::HintLabel => dim(text),
    })
}

#[cfg(test)]
mod tests {
    use gql_query::parse;

    use super::*;

    /// Removes ANSI escape sequences.
    fn strip(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn json_is_highlighted() {
        let output = Highlighter::new().highlight_json("{\"tag\": {\"$ne\": \"photo\"}}\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
        assert_eq!(strip(&output), "{\"tag\": {\"$ne\": \"photo\"}}\n");
    }

    #[test]
    fn toml_is_highlighted() {
        let output = Highlighter::new().highlight_toml("[output]\npretty = true\n");
        assert!(output.contains("\x1b["));
        assert_eq!(strip(&output), "[output]\npretty = true\n");
    }

    #[test]
    fn json_and_toml_syntaxes_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("json").is_some());
        assert!(ss.find_syntax_by_extension("toml").is_some());
    }

    #[test]
    fn filter_keeps_text_and_spacing() {
        let input = "author: -'Joe Bloggs' + (tag:[photo, video], count:>=5)";
        let output = highlight_filter(input);
        assert_eq!(strip(&output), input);
        assert!(output.contains(&paint(colors::CYAN, "author")));
        assert!(output.contains(&paint(colors::GREEN, "'Joe Bloggs'")));
        assert!(output.contains(&paint(colors::YELLOW, ">=")));
    }

    #[test]
    fn unlexable_filter_is_unchanged() {
        assert_eq!(highlight_filter("tag:'open"), "tag:'open");
    }

    #[test]
    fn error_context_points_at_position() {
        let err = parse("count:3+").unwrap_err();
        let lines: Vec<String> = strip(&error_context(&err))
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(
            lines[0],
            "Query Error: unexpected character in filter at char 9 (unexpected end of filter)"
        );
        assert_eq!(lines[1], "  count:3+");
        assert_eq!(lines[2], format!("  {}^", " ".repeat(8)));
        assert!(lines[3].starts_with("hint:"));
    }

    #[test]
    fn error_context_flattens_multiline_filter() {
        let err = parse("tag:photo+\ncount:").unwrap_err();
        let lines: Vec<String> = strip(&error_context(&err))
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines[1], "  tag:photo+ count:");
        assert_eq!(lines[2], format!("  {}^", " ".repeat(17)));
        assert!(lines[3].starts_with("hint:"));
    }

    #[test]
    fn header_formatting() {
        let h = header("Filters");
        assert!(h.starts_with(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
    }
}
