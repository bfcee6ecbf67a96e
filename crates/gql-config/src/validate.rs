//! Checks on a loaded configuration.
//!
//! Problems found here do not stop gql from running; they are reported as warnings by
//! `gql config` and `gql filters`.

use std::{fmt, path::PathBuf};

use gql_query::{SyntaxError, parse};

use crate::{Config, SavedFilter};

/// A non-fatal problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A saved filter expression does not parse.
    InvalidFilter {
        /// Name of the saved filter.
        name: String,
        /// File that defined it.
        source: PathBuf,
        /// The offending expression.
        expression: String,
        /// Parse failure.
        error: SyntaxError,
    },
    /// A saved filter name that cannot be written after `@`.
    InvalidFilterName {
        /// The name as written.
        name: String,
    },
    /// A saved filter refers to another saved filter; references are not expanded.
    NestedReference {
        /// Name of the saved filter.
        name: String,
        /// The `@reference` found in its expression.
        reference: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter {
                name,
                source,
                expression,
                error,
            } => write!(
                f,
                "saved filter '{name}' in {} does not parse: {expression:?} ({error})",
                source.display()
            ),
            Self::InvalidFilterName { name } => {
                write!(
                    f,
                    "saved filter name {name:?} should use only letters, digits, '_' and '-'"
                )
            }
            Self::NestedReference { name, reference } => {
                write!(
                    f,
                    "saved filter '{name}' refers to {reference}; saved filters cannot nest"
                )
            }
        }
    }
}

/// Returns every warning for the saved filters in `config`.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    config.filters.values().flat_map(validate_filter).collect()
}

/// Checks one saved filter.
fn validate_filter(filter: &SavedFilter) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !is_valid_name(&filter.name) {
        warnings.push(ConfigWarning::InvalidFilterName {
            name: filter.name.clone(),
        });
    }

    for part in &filter.parts {
        if let Some(reference) = part.split_whitespace().find(|w| w.starts_with('@')) {
            warnings.push(ConfigWarning::NestedReference {
                name: filter.name.clone(),
                reference: reference.to_string(),
            });
            continue;
        }
        if let Err(error) = parse(part) {
            warnings.push(ConfigWarning::InvalidFilter {
                name: filter.name.clone(),
                source: filter.source.clone(),
                expression: part.clone(),
                error,
            });
        }
    }

    warnings
}

/// Returns true for names made of ASCII letters, digits, `_` and `-`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
