//! Rendering filters back to canonical GQL text.
//!
//! The output has no whitespace, quotes strings only when they would not lex back as
//! the same bareword, and drops the fractional part of integral numbers, so parsing the
//! rendering yields an equal [`Filter`].
//!
//! Two values have no GQL spelling and do not survive a round trip: plain equality with
//! a negative number (a `-` after the colon is always negation), and strings ending in a
//! backslash (the closing quote would read as escaped).

use std::fmt;

use crate::{
    ast::{Node, Predicate, Statement, Value},
    compile::Filter,
    lexer::{TokenKind, classify_word, is_word_char},
    literal::Literal,
};

/// Renders a filter as canonical GQL text.
pub fn to_gql(filter: &Filter) -> String {
    match filter {
        Filter::Single {
            property,
            condition,
        } => render_predicate(&condition.clone().into_predicate(property.clone())),
        Filter::Combined(statements) => statements_to_gql(statements),
    }
}

/// Renders a statement sequence as canonical GQL text.
pub fn statements_to_gql(statements: &[Statement]) -> String {
    let mut out = String::new();
    for statement in statements {
        if let Some(combinator) = statement.combinator {
            out.push(combinator.symbol());
        }
        match &statement.node {
            Node::Predicate(predicate) => out.push_str(&render_predicate(predicate)),
            Node::Group(inner) => {
                out.push('(');
                out.push_str(&statements_to_gql(inner));
                out.push(')');
            }
        }
    }
    out
}

/// Renders one predicate.
fn render_predicate(predicate: &Predicate) -> String {
    let negation = if predicate.negated { "-" } else { "" };
    let value = match &predicate.value {
        Value::Scalar(literal) => render_literal(literal),
        Value::List(literals) => {
            let items: Vec<String> = literals.iter().map(render_literal).collect();
            format!("[{}]", items.join(","))
        }
    };
    format!(
        "{}:{negation}{}{value}",
        predicate.property,
        predicate.comparator.prefix()
    )
}

/// Renders a literal, quoting strings that would otherwise change meaning.
fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Literal::Number(n) => n.to_string(),
        Literal::String(s) if is_bare(s) => s.clone(),
        Literal::String(s) => format!("'{}'", s.replace('\'', "\\'")),
    }
}

/// Returns true when `s` lexes back as the same bareword string.
fn is_bare(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && s.chars().all(is_word_char)
        && matches!(classify_word(s), TokenKind::Bareword(_))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_gql(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn canonical(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    #[test]
    fn strips_whitespace() {
        assert_eq!(
            canonical("author: -joe + tag: [photo, video]"),
            "author:-joe+tag:[photo,video]"
        );
    }

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(canonical("author:'joe'"), "author:joe");
        assert_eq!(canonical("author:'Joe Bloggs'"), "author:'Joe Bloggs'");
        assert_eq!(canonical("id:'5'"), "id:'5'");
        assert_eq!(canonical("id:'null'"), "id:'null'");
        assert_eq!(canonical("id:'-x'"), "id:'-x'");
        assert_eq!(canonical(r"author:'John O\'Nolan'"), r"author:'John O\'Nolan'");
    }

    #[test]
    fn numbers() {
        assert_eq!(canonical("count:5"), "count:5");
        assert_eq!(canonical("count:>-2.50"), "count:>-2.5");
        assert_eq!(canonical("count:[1,2.5]"), "count:[1,2.5]");
    }

    #[test]
    fn groups_and_combinators() {
        assert_eq!(
            canonical("(tag:photo, image:-null) + author:-joe"),
            "(tag:photo,image:-null)+author:-joe"
        );
    }

    #[test]
    fn reparse_is_equal() {
        let filters = [
            "count:5",
            "count:-5",
            "tag:>=getting-started",
            "author:['Joe Bloggs', 'John O\\'Nolan', 'Hello World']",
            "featured:-false",
            "image:-null",
            "count:-[5, 8, 12]",
            "author:-joe+(tag:photo,image:-null,featured:true)",
            "a:1,(b:2+(c:3,d:'x y'))",
            "path:'a\\b'",
            "count:123456789012345678901234567890",
            "count:>-0.000001",
        ];
        for input in filters {
            let filter = parse(input).unwrap();
            assert_eq!(parse(&filter.to_string()).unwrap(), filter, "{input}");
        }
    }
}
