//! Configuration system for gql.
//!
//! gql uses TOML configuration files named `.gql.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.gql.toml`
//! files found, then loading `~/.gql.toml` as the global config with lowest precedence.
//!
//! A configuration controls how filters are printed and holds saved filters that can be
//! referenced on the command line as `@name`.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use gql_query::parse_statements;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawOutputSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for gql.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.gql.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output settings.
    pub output: OutputSettings,
    /// Saved filters by name.
    pub filters: BTreeMap<String, SavedFilter>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.gql.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Expands a command-line filter argument.
    ///
    /// Arguments starting with `@` name a saved filter and are replaced by its expression;
    /// anything else is returned unchanged.
    pub fn resolve_filter(&self, arg: &str) -> Result<String, ConfigError> {
        let Some(name) = arg.strip_prefix('@') else {
            return Ok(arg.to_string());
        };
        self.filters
            .get(name)
            .map(SavedFilter::expression)
            .ok_or_else(|| ConfigError::UnknownFilter {
                name: name.to_string(),
            })
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Saved filters that do not parse
    /// - Saved filter names that cannot be written after `@`
    /// - Saved filters that reference other saved filters
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            output: self.output.clone(),
            filters: self
                .filters
                .iter()
                .map(|(name, filter)| (name.clone(), filter.parts.clone()))
                .collect(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colorize when stdout is a terminal.
    #[default]
    Auto,
    /// Always colorize.
    Always,
    /// Never colorize.
    Never,
}

/// Which JSON shape to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// Flat mapping for a lone predicate, statements otherwise.
    #[default]
    Auto,
    /// Always the statements shape.
    Statements,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON.
    pub pretty: bool,
    /// Colorize output.
    pub color: ColorMode,
    /// JSON shape.
    pub shape: OutputShape,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            color: ColorMode::Auto,
            shape: OutputShape::Auto,
        }
    }
}

/// A named filter defined in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFilter {
    /// Name used after `@` on the command line.
    pub name: String,
    /// Filter expressions, joined with `+`.
    pub parts: Vec<String>,
    /// Config file that defined this filter.
    pub source: PathBuf,
    /// Whether this filter was defined in the global `~/.gql.toml`.
    pub is_global: bool,
}

impl SavedFilter {
    /// Returns the full filter expression.
    ///
    /// With several parts, any part that is itself a combined expression is wrapped in
    /// parentheses so it stays one statement.
    pub fn expression(&self) -> String {
        if let [single] = self.parts.as_slice() {
            return single.clone();
        }
        self.parts
            .iter()
            .map(|part| match parse_statements(part) {
                Ok(statements) if statements.len() > 1 => format!("({part})"),
                _ => part.clone(),
            })
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Output settings.
    output: OutputSettings,
    /// Saved filters (sorted for deterministic output).
    filters: BTreeMap<String, Vec<String>>,
}
