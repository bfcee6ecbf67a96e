//! Filter abstract syntax tree.
//!
//! Represents parsed filter statements before compilation to the public [`crate::Filter`].

use std::fmt;

use crate::literal::Literal;

/// How a predicate compares its property to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Plain `property:value`.
    Equals,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// Membership in a bracketed list.
    In,
}

impl Comparator {
    /// Returns the symbol written between the colon and the value (empty for
    /// equality and membership).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Equals | Self::In => "",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

/// A predicate value: one literal, or a list for membership tests.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single literal.
    Scalar(Literal),
    /// A bracketed list of literals.
    List(Vec<Literal>),
}

/// A single `property/comparator/value` constraint.
///
/// The parser only builds list values with [`Comparator::In`], and only sets `negated`
/// for [`Comparator::Equals`] and [`Comparator::In`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Property name, e.g. `tag.count`.
    pub property: String,
    /// Whether the comparison is negated (`-`).
    pub negated: bool,
    /// The comparison.
    pub comparator: Comparator,
    /// The value compared against.
    pub value: Value,
}

/// Logical joiner between sibling statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `+`
    And,
    /// `,`
    Or,
}

impl Combinator {
    /// Returns the name used in the statements output (`and` / `or`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Returns the source symbol (`+` / `,`).
    pub fn symbol(self) -> char {
        match self {
            Self::And => '+',
            Self::Or => ',',
        }
    }
}

/// The content of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single predicate.
    Predicate(Predicate),
    /// A parenthesized sub-sequence.
    Group(Vec<Statement>),
}

/// One entry in a statement sequence.
///
/// `combinator` records how the statement was joined to the previous sibling; it is
/// `None` exactly for the first statement of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Joiner to the previous sibling.
    pub combinator: Option<Combinator>,
    /// Predicate or group.
    pub node: Node,
}

impl Statement {
    /// Creates a predicate statement.
    pub fn predicate(predicate: Predicate, combinator: Option<Combinator>) -> Self {
        Self {
            combinator,
            node: Node::Predicate(predicate),
        }
    }

    /// Creates a group statement.
    pub fn group(statements: Vec<Self>, combinator: Option<Combinator>) -> Self {
        Self {
            combinator,
            node: Node::Group(statements),
        }
    }

    /// Formats the statement as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        let joiner = self
            .combinator
            .map(|c| format!("{} ", c.as_str().to_uppercase()))
            .unwrap_or_default();
        match &self.node {
            Node::Predicate(p) => {
                let not = if p.negated { "Not " } else { "" };
                writeln!(
                    f,
                    "{prefix}{joiner}{not}{:?}({:?}, {:?})",
                    p.comparator, p.property, p.value
                )
            }
            Node::Group(statements) => {
                writeln!(f, "{prefix}{joiner}Group")?;
                for statement in statements {
                    statement.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
