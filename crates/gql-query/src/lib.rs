//! Lexer, parser and compiler for GQL, a compact filter language.
//!
//! A filter is one or more predicates joined by combinators:
//!
//! - **Equality**: `tag:photo`, `author:'Joe Bloggs'`, `count:5`
//! - **Negation**: `tag:-photo`, `image:-null`
//! - **Comparison**: `count:>5`, `count:<=10`, `tag:>=getting-started`
//! - **Membership**: `tag:[photo,video]`, `tag:-[photo,video]`
//! - **AND / OR**: `tag:photo+featured:true`, `tag:photo,tag:video`
//! - **Grouping**: `author:-joe+(tag:photo,image:-null)`
//!
//! Combinators have no precedence; statements keep their source order. A lone predicate
//! compiles to a flat mapping, anything else to a statement list.
//!
//! # Example
//!
//! ```
//! use gql_query::parse;
//! use serde_json::json;
//!
//! let filter = parse("tag:-'getting-started'").unwrap();
//! assert_eq!(filter.to_json(), json!({"tag": {"$ne": "getting-started"}}));
//!
//! let err = parse("count:3+").unwrap_err();
//! assert_eq!(err.to_string(), "Query Error: unexpected character in filter at char 9");
//! ```

#![warn(missing_docs)]

mod ast;
mod compile;
mod error;
mod lexer;
mod literal;
mod parser;
mod render;

pub use ast::{Combinator, Comparator, Node, Predicate, Statement, Value};
pub use compile::{Condition, Filter, Operator, OperatorTag};
pub use error::{ContextPart, SyntaxError, SyntaxErrorKind};
pub use lexer::{Token, TokenKind, tokenize};
pub use literal::Literal;
pub use parser::parse_statements;
pub use render::{statements_to_gql, to_gql};

/// Parses and compiles a filter string.
///
/// Returns the flat mapping shape for a lone predicate and the statements shape when the
/// filter uses `+`, `,` or parentheses. The first problem found aborts the parse.
pub fn parse(input: &str) -> Result<Filter, SyntaxError> {
    parse_statements(input).map(Filter::compile)
}
