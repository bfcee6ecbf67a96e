//! Compilation of statement sequences into the public filter representation.
//!
//! A lone predicate compiles to a flat `{property: condition}` mapping whose operators
//! use the `$`-prefixed tag vocabulary. Anything combined or grouped compiles to the
//! statements shape, whose operators use the SQL-like symbol vocabulary instead. The two
//! vocabularies are kept as separate tables so each output shape stays stable.

use serde_json::{Map, Value as JsonValue, json};

use crate::{
    ast::{Comparator, Node, Predicate, Statement, Value},
    literal::Literal,
};

/// Operator tags used in the flat mapping shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorTag {
    /// `-value`
    NotEqual,
    /// `>value`
    GreaterThan,
    /// `<value`
    LessThan,
    /// `>=value`
    GreaterOrEqual,
    /// `<=value`
    LessOrEqual,
    /// `[v,...]`
    In,
    /// `-[v,...]`
    NotIn,
}

impl OperatorTag {
    /// Returns the tag as it appears in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotEqual => "$ne",
            Self::GreaterThan => "$gt",
            Self::LessThan => "$lt",
            Self::GreaterOrEqual => "$gte",
            Self::LessOrEqual => "$lte",
            Self::In => "$in",
            Self::NotIn => "$nin",
        }
    }
}

/// Operators used in the statements shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equality with a non-null value.
    Equal,
    /// Equality with null.
    Is,
    /// Negated equality with a non-null value.
    NotEqual,
    /// Negated equality with null.
    IsNot,
    /// Greater than.
    GreaterThan,
    /// Less than.
    LessThan,
    /// Greater than or equal.
    GreaterOrEqual,
    /// Less than or equal.
    LessOrEqual,
    /// List membership.
    In,
    /// Negated list membership.
    NotIn,
}

impl Operator {
    /// Returns the symbol as it appears in JSON output.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Is => "IS",
            Self::NotEqual => "!=",
            Self::IsNot => "IS NOT",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl Value {
    /// Converts to a JSON value.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Scalar(literal) => literal.to_json(),
            Self::List(literals) => literals.iter().map(Literal::to_json).collect(),
        }
    }
}

impl Predicate {
    /// Returns the statements-shape operator for this predicate.
    pub fn operator(&self) -> Operator {
        let is_null = matches!(self.value, Value::Scalar(Literal::Null));
        match (self.comparator, self.negated) {
            (Comparator::Equals, false) if is_null => Operator::Is,
            (Comparator::Equals, false) => Operator::Equal,
            (Comparator::Equals, true) if is_null => Operator::IsNot,
            (Comparator::Equals, true) => Operator::NotEqual,
            (Comparator::GreaterThan, _) => Operator::GreaterThan,
            (Comparator::LessThan, _) => Operator::LessThan,
            (Comparator::GreaterOrEqual, _) => Operator::GreaterOrEqual,
            (Comparator::LessOrEqual, _) => Operator::LessOrEqual,
            (Comparator::In, false) => Operator::In,
            (Comparator::In, true) => Operator::NotIn,
        }
    }

    /// Splits into the property name and its flat-mapping condition.
    pub fn into_condition(self) -> (String, Condition) {
        let Self {
            property,
            negated,
            comparator,
            value,
        } = self;
        let tag = match (comparator, negated) {
            (Comparator::Equals, false) => {
                if let Value::Scalar(literal) = value {
                    return (property, Condition::Equals(literal));
                }
                OperatorTag::In
            }
            (Comparator::Equals, true) => OperatorTag::NotEqual,
            (Comparator::GreaterThan, _) => OperatorTag::GreaterThan,
            (Comparator::LessThan, _) => OperatorTag::LessThan,
            (Comparator::GreaterOrEqual, _) => OperatorTag::GreaterOrEqual,
            (Comparator::LessOrEqual, _) => OperatorTag::LessOrEqual,
            (Comparator::In, false) => OperatorTag::In,
            (Comparator::In, true) => OperatorTag::NotIn,
        };
        (property, Condition::Tagged(tag, value))
    }

    /// Converts to a statements-shape JSON object.
    fn to_json(&self) -> Map<String, JsonValue> {
        let mut object = Map::new();
        object.insert("prop".into(), JsonValue::String(self.property.clone()));
        object.insert("op".into(), JsonValue::String(self.operator().symbol().into()));
        object.insert("value".into(), self.value.to_json());
        object
    }
}

/// Converts a statement to a statements-shape JSON object.
fn statement_to_json(statement: &Statement) -> JsonValue {
    let mut object = match &statement.node {
        Node::Predicate(predicate) => predicate.to_json(),
        Node::Group(statements) => {
            let mut object = Map::new();
            object.insert("group".into(), statements_to_json(statements));
            object
        }
    };
    if let Some(combinator) = statement.combinator {
        object.insert("func".into(), JsonValue::String(combinator.as_str().into()));
    }
    JsonValue::Object(object)
}

/// Converts a statement sequence to a JSON array.
fn statements_to_json(statements: &[Statement]) -> JsonValue {
    statements.iter().map(statement_to_json).collect()
}

/// The right-hand side of a flat mapping entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Plain equality: the mapping holds the literal itself.
    Equals(Literal),
    /// Any other comparison: the mapping holds `{tag: value}`.
    Tagged(OperatorTag, Value),
}

impl Condition {
    /// Converts back to a predicate on `property`.
    pub fn into_predicate(self, property: String) -> Predicate {
        let (comparator, negated, value) = match self {
            Self::Equals(literal) => (Comparator::Equals, false, Value::Scalar(literal)),
            Self::Tagged(tag, value) => {
                let (comparator, negated) = match tag {
                    OperatorTag::NotEqual => (Comparator::Equals, true),
                    OperatorTag::GreaterThan => (Comparator::GreaterThan, false),
                    OperatorTag::LessThan => (Comparator::LessThan, false),
                    OperatorTag::GreaterOrEqual => (Comparator::GreaterOrEqual, false),
                    OperatorTag::LessOrEqual => (Comparator::LessOrEqual, false),
                    OperatorTag::In => (Comparator::In, false),
                    OperatorTag::NotIn => (Comparator::In, true),
                };
                (comparator, negated, value)
            }
        };
        Predicate {
            property,
            negated,
            comparator,
            value,
        }
    }

    /// Converts to a JSON value.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Equals(literal) => literal.to_json(),
            Self::Tagged(tag, value) => {
                let mut object = Map::new();
                object.insert(tag.as_str().into(), value.to_json());
                JsonValue::Object(object)
            }
        }
    }
}

/// A compiled filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The whole input was one predicate: a flat `{property: condition}` mapping.
    Single {
        /// Property name.
        property: String,
        /// Condition applied to the property.
        condition: Condition,
    },
    /// The input used `+`, `,` or parentheses.
    Combined(Vec<Statement>),
}

impl Filter {
    /// Compiles a parsed statement sequence.
    pub fn compile(statements: Vec<Statement>) -> Self {
        match <[Statement; 1]>::try_from(statements) {
            Ok([Statement {
                node: Node::Predicate(predicate),
                ..
            }]) => Self::single(predicate),
            Ok([statement]) => Self::Combined(vec![statement]),
            Err(statements) => Self::Combined(statements),
        }
    }

    /// Builds the flat mapping shape from one predicate.
    fn single(predicate: Predicate) -> Self {
        let (property, condition) = predicate.into_condition();
        Self::Single {
            property,
            condition,
        }
    }

    /// Returns the filter as a statement sequence, whichever shape it has.
    pub fn into_statements(self) -> Vec<Statement> {
        match self {
            Self::Single {
                property,
                condition,
            } => vec![Statement::predicate(condition.into_predicate(property), None)],
            Self::Combined(statements) => statements,
        }
    }

    /// Converts to the JSON representation consumed by query engines.
    ///
    /// ```
    /// use gql_query::parse;
    /// use serde_json::json;
    ///
    /// let filter = parse("count:-[5,8]").unwrap();
    /// assert_eq!(filter.to_json(), json!({"count": {"$nin": [5, 8]}}));
    /// ```
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Single {
                property,
                condition,
            } => {
                let mut object = Map::new();
                object.insert(property.clone(), condition.to_json());
                JsonValue::Object(object)
            }
            Self::Combined(statements) => json!({ "statements": statements_to_json(statements) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Combinator, parser::parse_statements};

    fn compile(input: &str) -> Filter {
        Filter::compile(parse_statements(input).unwrap())
    }

    #[test]
    fn predicate_splits_into_property_and_condition() {
        let predicate = Predicate {
            property: "tag".into(),
            negated: true,
            comparator: Comparator::In,
            value: Value::List(vec![Literal::from("photo")]),
        };
        let (property, condition) = predicate.into_condition();
        assert_eq!(property, "tag");
        assert_eq!(
            condition,
            Condition::Tagged(OperatorTag::NotIn, Value::List(vec![Literal::from("photo")]))
        );
    }

    #[test]
    fn lone_predicate_is_single() {
        assert_eq!(
            compile("count:5"),
            Filter::Single {
                property: "count".into(),
                condition: Condition::Equals(Literal::Number(5.0)),
            }
        );
    }

    #[test]
    fn lone_group_is_combined() {
        assert!(matches!(compile("(count:5)"), Filter::Combined(_)));
    }

    #[test]
    fn combined_keeps_statements() {
        let Filter::Combined(statements) = compile("a:1+b:2") else {
            panic!("expected combined");
        };
        assert_eq!(statements[1].combinator, Some(Combinator::And));
    }

    #[test]
    fn null_operators_differ_per_shape() {
        assert_eq!(
            compile("image:-null").to_json(),
            json!({"image": {"$ne": null}})
        );
        assert_eq!(
            compile("image:-null+image:null").to_json(),
            json!({"statements": [
                {"prop": "image", "op": "IS NOT", "value": null},
                {"prop": "image", "op": "IS", "value": null, "func": "and"}
            ]})
        );
    }

    #[test]
    fn tag_table() {
        let cases = [
            ("a:-1", "$ne"),
            ("a:>1", "$gt"),
            ("a:<1", "$lt"),
            ("a:>=1", "$gte"),
            ("a:<=1", "$lte"),
            ("a:[1]", "$in"),
            ("a:-[1]", "$nin"),
        ];
        for (input, tag) in cases {
            let Filter::Single {
                condition: Condition::Tagged(t, _),
                ..
            } = compile(input)
            else {
                panic!("expected tagged condition for {input}");
            };
            assert_eq!(t.as_str(), tag, "{input}");
        }
    }

    #[test]
    fn symbol_table() {
        let cases = [
            ("a:1", "="),
            ("a:-1", "!="),
            ("a:>1", ">"),
            ("a:<1", "<"),
            ("a:>=1", ">="),
            ("a:<=1", "<="),
            ("a:[1]", "IN"),
            ("a:-[1]", "NOT IN"),
        ];
        for (input, symbol) in cases {
            let statements = parse_statements(input).unwrap();
            let Node::Predicate(p) = &statements[0].node else {
                panic!("expected predicate");
            };
            assert_eq!(p.operator().symbol(), symbol, "{input}");
        }
    }

    #[test]
    fn into_statements_round_trips_single() {
        for input in ["a:1", "a:-x", "a:>=1", "a:-[1,2]", "a:[x]", "a:-null"] {
            let statements = parse_statements(input).unwrap();
            assert_eq!(compile(input).into_statements(), statements, "{input}");
        }
    }
}
