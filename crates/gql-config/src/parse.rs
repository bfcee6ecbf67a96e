//! Reading single `.gql.toml` files.
//!
//! Every field of [`RawConfig`] is optional so that a file only states what it wants to
//! override; merging fills in the rest.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ColorMode, ConfigError, OutputShape};

/// One configuration file as written on disk.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, files further up the tree and the global file are ignored.
    pub root: Option<bool>,
    /// The `[output]` table.
    pub output: Option<RawOutputSettings>,
    /// The `[filters]` table. Each entry is an expression or a list of expressions.
    #[serde_as(as = "Option<BTreeMap<_, OneOrMany<_>>>")]
    pub filters: Option<BTreeMap<String, Vec<String>>>,
}

/// The `[output]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOutputSettings {
    /// Pretty-print JSON.
    pub pretty: Option<bool>,
    /// Colorize output.
    pub color: Option<ColorMode>,
    /// JSON shape.
    pub shape: Option<OutputShape>,
}

/// Reads and parses a configuration file.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&contents, path)
}

/// Parses configuration text. `path` is only used in errors.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns true if the file at `path` declares `root = true`.
///
/// Unreadable or malformed files count as not root; loading reports them later.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}
