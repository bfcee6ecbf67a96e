//! Error type for filter parsing.
//!
//! Every lexical and grammatical failure is reported as a single [`SyntaxError`]. Its
//! `Display` output is a fixed string that downstream callers match on; the detail kind
//! and the original input are kept alongside for diagnostics.

use thiserror::Error;

/// What the pipeline found at the reported position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A character outside every token rule.
    UnexpectedCharacter(char),
    /// A single-quoted string with no closing quote.
    UnterminatedString,
    /// Numeric text that does not form a number.
    InvalidNumber,
    /// A well-formed token in a place the grammar does not allow it.
    UnexpectedToken,
    /// Input ended while the grammar still expected something.
    UnexpectedEnd,
    /// A bracket pair with no values.
    EmptyList,
    /// Negation combined with an ordering comparator (e.g. `count:->5`).
    NegatedComparator,
}

impl SyntaxErrorKind {
    /// Returns a short human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Self::UnexpectedCharacter(ch) => format!("unexpected character {ch:?}"),
            Self::UnterminatedString => "unterminated string".to_string(),
            Self::InvalidNumber => "invalid number".to_string(),
            Self::UnexpectedToken => "unexpected token".to_string(),
            Self::UnexpectedEnd => "unexpected end of filter".to_string(),
            Self::EmptyList => "empty value list".to_string(),
            Self::NegatedComparator => "negation cannot be combined with a comparator".to_string(),
        }
    }
}

/// A filter that could not be parsed.
///
/// The position is a 1-based character offset into the input. When input ends early the
/// position is one past the last character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Query Error: unexpected character in filter at char {position}")]
pub struct SyntaxError {
    /// 1-based character offset of the first character that could not be accounted for.
    position: usize,
    /// Detail kind.
    kind: SyntaxErrorKind,
    /// The original filter string.
    input: String,
}

impl SyntaxError {
    /// Creates an error at a 0-based character offset.
    pub(crate) fn at(kind: SyntaxErrorKind, offset: usize, input: &str) -> Self {
        Self {
            position: offset + 1,
            kind,
            input: input.to_string(),
        }
    }

    /// Returns the 1-based character offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the detail kind.
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Returns the filter string that failed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns a suggestion for common mistakes.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            SyntaxErrorKind::UnterminatedString => {
                Some("Add a closing quote (') and escape inner quotes as \\'")
            }
            SyntaxErrorKind::InvalidNumber => {
                Some("Quote values that are not numbers, e.g. version:'1.2.3'")
            }
            SyntaxErrorKind::EmptyList => Some("Lists need at least one value, e.g. tag:[photo]"),
            SyntaxErrorKind::NegatedComparator => {
                Some("Use the opposite comparator instead, e.g. count:<=5 rather than count:->5")
            }
            SyntaxErrorKind::UnexpectedEnd if self.input.trim().is_empty() => {
                Some("Filters look like property:value, e.g. tag:photo")
            }
            SyntaxErrorKind::UnexpectedEnd => {
                Some("Check for a trailing + or , or an unclosed ( or [")
            }
            SyntaxErrorKind::UnexpectedCharacter(_) | SyntaxErrorKind::UnexpectedToken => None,
        }
    }

    /// Formats the error with the input and a caret under the offending character.
    pub fn format_with_context(&self) -> String {
        self.render_context(|_, text| text.to_string())
    }

    /// Lays out the error, the echoed input, a caret line and an optional hint.
    ///
    /// `style` is called on each decorated part and returns the text to emit for it, so
    /// callers can add color without changing the layout. The echoed input has control
    /// characters replaced by spaces to keep it on one line with the caret aligned.
    pub fn render_context(&self, style: impl Fn(ContextPart, &str) -> String) -> String {
        let mut result = format!(
            "{} ({})\n",
            style(ContextPart::Message, &self.to_string()),
            self.kind.describe()
        );
        result.push_str(&format!("  {}\n", echo_line(&self.input)));
        result.push_str(&format!(
            "  {}{}",
            " ".repeat(self.position - 1),
            style(ContextPart::Caret, "^")
        ));
        if let Some(hint) = self.hint() {
            result.push_str(&format!("\n{} {hint}", style(ContextPart::HintLabel, "hint:")));
        }
        result
    }
}

/// A decorated part of [`SyntaxError::render_context`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPart {
    /// The fixed error message.
    Message,
    /// The `^` under the failing character.
    Caret,
    /// The `hint:` label.
    HintLabel,
}

/// Returns `input` with each control character replaced by a single space.
fn echo_line(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
