//! Filter parser.
//!
//! Parses a token stream into a statement sequence using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! sequence  → statement (("+" | ",") statement)*
//! statement → predicate | "(" sequence ")"
//! predicate → PROPERTY ":" "-"? (scalar | list | COMPARATOR scalar)
//! list      → "[" scalar ("," scalar)* "]"
//! scalar    → STRING | BAREWORD | NUMBER | BOOL | NULL
//! ```
//!
//! Combinators have no precedence: statements are kept in source order and each one
//! records the combinator that joined it to its predecessor. A `-` cannot be combined
//! with an ordering comparator.

use crate::{
    ast::{Combinator, Comparator, Predicate, Statement, Value},
    error::{SyntaxError, SyntaxErrorKind},
    lexer::{Token, TokenKind, tokenize},
    literal::{Literal, coerce},
};

/// Recursive descent parser for filter statements.
struct Parser<'a> {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
    /// The original input, kept for error reporting.
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>, input: &'a str) -> Self {
        Self {
            tokens,
            position: 0,
            input,
        }
    }

    /// Parses the whole token stream into a top-level statement sequence.
    fn parse(mut self) -> Result<Vec<Statement>, SyntaxError> {
        let statements = self.parse_sequence()?;

        if let Some(token) = self.peek() {
            return Err(self.unexpected(token));
        }

        Ok(statements)
    }

    /// Parses: sequence → statement (("+" | ",") statement)*
    fn parse_sequence(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = vec![self.parse_statement(None)?];

        while let Some(combinator) = self.peek_combinator() {
            self.advance();
            statements.push(self.parse_statement(Some(combinator))?);
        }

        Ok(statements)
    }

    /// Parses: statement → predicate | "(" sequence ")"
    fn parse_statement(
        &mut self,
        combinator: Option<Combinator>,
    ) -> Result<Statement, SyntaxError> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::LParen) => {
                self.advance(); // consume (
                let inner = self.parse_sequence()?;
                self.expect(&TokenKind::RParen)?;
                Ok(Statement::group(inner, combinator))
            }
            Some(TokenKind::Property(_)) => {
                Ok(Statement::predicate(self.parse_predicate()?, combinator))
            }
            _ => Err(self.unexpected_here()),
        }
    }

    /// Parses: predicate → PROPERTY ":" "-"? (scalar | list | COMPARATOR scalar)
    fn parse_predicate(&mut self) -> Result<Predicate, SyntaxError> {
        let Some(TokenKind::Property(property)) = self.peek().map(|t| t.kind.clone()) else {
            return Err(self.unexpected_here());
        };
        self.advance();
        self.expect(&TokenKind::Colon)?;

        let negated = self.check(&TokenKind::Dash);
        if negated {
            self.advance();
        }

        let (comparator, value) = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Comparator(_)) if negated => {
                return Err(self.error_here(SyntaxErrorKind::NegatedComparator));
            }
            Some(&TokenKind::Comparator(comparator)) => {
                self.advance();
                (comparator, Value::Scalar(self.parse_scalar()?))
            }
            Some(TokenKind::LBracket) => (Comparator::In, Value::List(self.parse_list()?)),
            _ => (Comparator::Equals, Value::Scalar(self.parse_scalar()?)),
        };

        Ok(Predicate {
            property,
            negated,
            comparator,
            value,
        })
    }

    /// Parses: list → "[" scalar ("," scalar)* "]"
    fn parse_list(&mut self) -> Result<Vec<Literal>, SyntaxError> {
        self.advance(); // consume [

        if self.check(&TokenKind::RBracket) {
            return Err(self.error_here(SyntaxErrorKind::EmptyList));
        }

        let mut values = Vec::new();
        loop {
            values.push(self.parse_scalar()?);

            match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Comma) => self.advance(),
                Some(TokenKind::RBracket) => {
                    self.advance();
                    return Ok(values);
                }
                _ => return Err(self.unexpected_here()),
            }
        }
    }

    /// Parses: scalar → STRING | BAREWORD | NUMBER | BOOL | NULL
    fn parse_scalar(&mut self) -> Result<Literal, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind.is_literal() => {
                let literal = coerce(token, self.input)?;
                self.advance();
                Ok(literal)
            }
            _ => Err(self.unexpected_here()),
        }
    }

    /// Returns the combinator at the current position, if any.
    fn peek_combinator(&self) -> Option<Combinator> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Plus) => Some(Combinator::And),
            Some(TokenKind::Comma) => Some(Combinator::Or),
            _ => None,
        }
    }

    /// Consumes the expected token or fails at the current position.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), SyntaxError> {
        if !self.check(kind) {
            return Err(self.unexpected_here());
        }
        self.advance();
        Ok(())
    }

    /// Returns an error for the current token, or for end of input.
    fn unexpected_here(&self) -> SyntaxError {
        match self.peek() {
            Some(token) => self.unexpected(token),
            None => SyntaxError::at(SyntaxErrorKind::UnexpectedEnd, self.end(), self.input),
        }
    }

    /// Returns an unexpected-token error located at `token`.
    fn unexpected(&self, token: &Token) -> SyntaxError {
        SyntaxError::at(SyntaxErrorKind::UnexpectedToken, token.position, self.input)
    }

    /// Returns an error of the given kind at the current token.
    fn error_here(&self, kind: SyntaxErrorKind) -> SyntaxError {
        let position = self.peek().map_or_else(|| self.end(), |t| t.position);
        SyntaxError::at(kind, position, self.input)
    }

    /// Character offset just past the end of input.
    fn end(&self) -> usize {
        self.input.chars().count()
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Checks if the current token has the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| &t.kind == kind)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses a filter string into its statement sequence.
///
/// This runs the lexer and parser but not the compiler, so even a lone predicate comes
/// back as a one-element sequence.
///
/// A filter with no tokens at all is rejected at char 1.
pub fn parse_statements(input: &str) -> Result<Vec<Statement>, SyntaxError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(SyntaxError::at(SyntaxErrorKind::UnexpectedEnd, 0, input));
    }
    Parser::new(tokens, input).parse()
}
