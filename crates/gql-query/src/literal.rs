//! Literal values and their coercion from tokens.

use serde_json::{Number, Value as JsonValue};

use crate::{
    error::{SyntaxError, SyntaxErrorKind},
    lexer::{Token, TokenKind},
};

/// Largest magnitude at which every integer is exactly representable as an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A typed filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A number (integers and decimals alike).
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// A string, already unescaped.
    String(String),
}

impl Literal {
    /// Returns true for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts to a JSON value. Integral numbers become JSON integers.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                JsonValue::from(*n as i64)
            }
            Self::Number(n) => Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number),
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Null => JsonValue::Null,
            Self::String(s) => JsonValue::String(s.clone()),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Converts a literal token into a typed value.
pub(crate) fn coerce(token: &Token, input: &str) -> Result<Literal, SyntaxError> {
    match &token.kind {
        TokenKind::Number(text) => coerce_number(text, token.position, input).map(Literal::Number),
        TokenKind::Bool(b) => Ok(Literal::Bool(*b)),
        TokenKind::Null => Ok(Literal::Null),
        TokenKind::String(s) | TokenKind::Bareword(s) => Ok(Literal::String(s.clone())),
        _ => Err(SyntaxError::at(
            SyntaxErrorKind::UnexpectedToken,
            token.position,
            input,
        )),
    }
}

/// Parses numeric text of the form `-?digits(.digits)?`.
fn coerce_number(text: &str, position: usize, input: &str) -> Result<f64, SyntaxError> {
    if let Some(bad) = first_invalid_char(text) {
        return Err(SyntaxError::at(
            SyntaxErrorKind::InvalidNumber,
            position + bad,
            input,
        ));
    }
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| SyntaxError::at(SyntaxErrorKind::InvalidNumber, position, input))
}

/// Returns the char index of the first character breaking `-?digits(.digits)?`.
fn first_invalid_char(text: &str) -> Option<usize> {
    let mut seen_dot = false;
    let mut last_dot = None;
    let mut run = 0;

    for (idx, ch) in text.chars().enumerate() {
        match ch {
            '-' if idx == 0 => {}
            '0'..='9' => run += 1,
            '.' if !seen_dot && run > 0 => {
                seen_dot = true;
                last_dot = Some(idx);
                run = 0;
            }
            _ => return Some(idx),
        }
    }

    // a trailing dot has no fractional digits
    if run == 0 {
        return Some(last_dot.unwrap_or(0));
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::lexer::tokenize;

    fn coerce_value(input: &str) -> Result<Literal, SyntaxError> {
        let tokens = tokenize(input).unwrap();
        coerce(&tokens[2], input)
    }

    #[test]
    fn integers_and_decimals() {
        assert_eq!(coerce_value("a:5").unwrap(), Literal::Number(5.0));
        assert_eq!(coerce_value("a:12.25").unwrap(), Literal::Number(12.25));
        assert_eq!(
            coerce(&tokenize("a:>-3").unwrap()[3], "a:>-3").unwrap(),
            Literal::Number(-3.0)
        );
    }

    #[test]
    fn overflowing_number_is_rejected() {
        let input = format!("a:1{}", "0".repeat(400));
        let err = coerce_value(&input).unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::InvalidNumber);
        assert_eq!(err.position(), 3);

        let input = format!("a:>-9{}.5", "9".repeat(400));
        let err = coerce(&tokenize(&input).unwrap()[3], &input).unwrap_err();
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn keywords() {
        assert_eq!(coerce_value("a:true").unwrap(), Literal::Bool(true));
        assert_eq!(coerce_value("a:false").unwrap(), Literal::Bool(false));
        assert_eq!(coerce_value("a:null").unwrap(), Literal::Null);
    }

    #[test]
    fn strings() {
        assert_eq!(coerce_value("a:ghost").unwrap(), Literal::from("ghost"));
        assert_eq!(coerce_value("a:'5'").unwrap(), Literal::from("5"));
        assert_eq!(coerce_value("a:'null'").unwrap(), Literal::from("null"));
    }

    #[test]
    fn malformed_number_points_at_bad_char() {
        let err = coerce_value("version:1.2.3").unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::InvalidNumber);
        assert_eq!(err.position(), 12);
    }

    #[test]
    fn trailing_dot_is_invalid() {
        let err = coerce_value("a:5.").unwrap_err();
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn json_numbers() {
        assert_eq!(Literal::Number(5.0).to_json(), json!(5));
        assert_eq!(Literal::Number(-12.0).to_json(), json!(-12));
        assert_eq!(Literal::Number(2.5).to_json(), json!(2.5));
        assert_eq!(Literal::Null.to_json(), json!(null));
        assert_eq!(Literal::from("x").to_json(), json!("x"));
    }
}
