//! Filter lexer (tokenizer).
//!
//! Converts a filter string into a flat stream of positioned tokens for the parser.
//! Whitespace outside quoted strings is discarded. Barewords that are immediately
//! followed by a colon become properties, and `true`, `false`, `null` and numeric
//! words are classified here so the parser only has to coerce them.

use std::{fmt, iter::Peekable, str::Chars};

use crate::{
    ast::Comparator,
    error::{SyntaxError, SyntaxErrorKind},
};

/// The classified part of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A property name (a bareword followed by `:`).
    Property(String),

    /// The `:` separating a property from its value.
    Colon,

    /// Negation marker (`-` directly after a colon).
    Dash,

    /// One of `>`, `<`, `>=`, `<=`.
    Comparator(Comparator),

    /// Left bracket, opening a value list.
    LBracket,

    /// Right bracket, closing a value list.
    RBracket,

    /// Comma: list separator inside brackets, OR between statements.
    Comma,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,

    /// Plus: AND between statements.
    Plus,

    /// A single-quoted string (quotes stripped, escapes resolved).
    String(String),

    /// An unquoted word that is not a keyword or number.
    Bareword(String),

    /// Numeric text, coerced to a number by the parser.
    Number(String),

    /// `true` or `false`.
    Bool(bool),

    /// `null`.
    Null,
}

impl TokenKind {
    /// Returns true for tokens that can stand as a value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::Bareword(_) | Self::Number(_) | Self::Bool(_) | Self::Null
        )
    }

    /// Returns the upper-case kind name used in token listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Property(_) => "PROPERTY",
            Self::Colon => "COLON",
            Self::Dash => "DASH",
            Self::Comparator(_) => "COMPARATOR",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Comma => "COMMA",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Plus => "PLUS",
            Self::String(_) => "STRING",
            Self::Bareword(_) => "BAREWORD",
            Self::Number(_) => "NUMBER",
            Self::Bool(_) => "BOOL",
            Self::Null => "NULL",
        }
    }
}

/// A classified lexeme with its source text and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token classification.
    pub kind: TokenKind,
    /// Raw source text, including quotes for strings.
    pub text: String,
    /// 0-based character offset of the first character.
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}  {:<10} {}", self.position + 1, self.kind.name(), self.text)
    }
}

/// Returns true for characters allowed in the body of a bareword.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '.' | '_')
}

/// Returns true when a word should be lexed as numeric text.
///
/// Numeric words start with a digit (optionally after `-`) and contain only digits and
/// dots. Malformed ones like `1.2.3` are still numeric here and rejected during coercion.
fn is_numeric_word(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Classifies a value word (one that is not followed by a colon).
pub(crate) fn classify_word(word: &str) -> TokenKind {
    match word {
        "true" => TokenKind::Bool(true),
        "false" => TokenKind::Bool(false),
        "null" => TokenKind::Null,
        _ if is_numeric_word(word) => TokenKind::Number(word.to_string()),
        _ => TokenKind::Bareword(word.to_string()),
    }
}

/// Tokenizes a filter string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current character offset in input.
    position: usize,
    /// Current byte offset in input.
    offset: usize,
    /// Whether the previous token was a colon (a following `-` negates).
    after_colon: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            offset: 0,
            after_colon: false,
        }
    }

    /// Creates an error at a specific character offset.
    fn error_at(&self, kind: SyntaxErrorKind, position: usize) -> SyntaxError {
        SyntaxError::at(kind, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        let start = self.position;
        let start_offset = self.offset;

        let kind = match ch {
            ':' => self.single(TokenKind::Colon),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '+' => self.single(TokenKind::Plus),
            ',' => self.single(TokenKind::Comma),
            '-' if self.after_colon => self.single(TokenKind::Dash),
            '>' => self.read_comparator(Comparator::GreaterThan, Comparator::GreaterOrEqual),
            '<' => self.read_comparator(Comparator::LessThan, Comparator::LessOrEqual),
            '\'' => self.read_string()?,
            c if is_word_char(c) => self.read_word(),
            c => return Err(self.error_at(SyntaxErrorKind::UnexpectedCharacter(c), start)),
        };

        self.after_colon = kind == TokenKind::Colon;

        Ok(Some(Token {
            kind,
            text: self.input[start_offset..self.offset].to_string(),
            position: start,
        }))
    }

    /// Consumes one character and returns the given kind.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Reads `>`/`<`, matching a following `=` greedily.
    fn read_comparator(&mut self, bare: Comparator, with_equals: Comparator) -> TokenKind {
        self.advance();
        if self.chars.peek() == Some(&'=') {
            self.advance();
            TokenKind::Comparator(with_equals)
        } else {
            TokenKind::Comparator(bare)
        }
    }

    /// Reads a single-quoted string. Only `\'` is an escape; other backslashes are kept.
    fn read_string(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.position;
        self.advance(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'\'') => {
                    self.advance(); // consume closing quote
                    return Ok(TokenKind::String(content));
                }
                Some(&'\\') => {
                    self.advance();
                    if self.chars.peek() == Some(&'\'') {
                        self.advance();
                        content.push('\'');
                    } else {
                        content.push('\\');
                    }
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at(SyntaxErrorKind::UnterminatedString, start)),
            }
        }
    }

    /// Reads a bareword and classifies it as a property or a value word.
    fn read_word(&mut self) -> TokenKind {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if !is_word_char(ch) {
                break;
            }
            word.push(ch);
            self.advance();
        }

        let starts_like_name = word.starts_with(|c: char| c.is_alphabetic() || c == '_');
        if starts_like_name && self.input[self.offset..].trim_start().starts_with(':') {
            return TokenKind::Property(word);
        }

        classify_word(&word)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += 1;
            self.offset += ch.len_utf8();
        }
    }
}

/// Tokenizes a filter string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(input).tokenize()
}
