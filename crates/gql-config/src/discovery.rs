//! Locating `.gql.toml` files.
//!
//! Local files are found by walking from the working directory towards the filesystem
//! root. The global `~/.gql.toml` is consulted last unless a local file set `root = true`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".gql.toml";

/// Returns every config file that applies to `cwd`, most specific first.
///
/// The walk stops at the first file declaring `root = true`; in that case the global
/// file is not included.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    configs
}

/// Path of the global configuration file, `~/.gql.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Returns true if `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
