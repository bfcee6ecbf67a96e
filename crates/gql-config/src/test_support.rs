//! Temporary directory helpers for unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A scratch directory tree that is removed on drop.
pub struct TestDir {
    /// Backing temporary directory.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory relative to the root.
    pub fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes an empty `.gql.toml` in `rel_path`.
    pub fn create_config(&self, rel_path: &str) -> PathBuf {
        self.create_config_with_content(rel_path, "# test config\n")
    }

    /// Writes an empty `.gql.toml` at the root.
    pub fn create_config_at_root(&self) -> PathBuf {
        self.create_config_with_content("", "# outer config\n")
    }

    /// Writes a `.gql.toml` with `content` in `rel_path`.
    pub fn create_config_with_content(&self, rel_path: &str, content: &str) -> PathBuf {
        let config = self.create_dir(rel_path).join(CONFIG_FILENAME);
        fs::write(&config, content).unwrap();
        config
    }

    /// Writes a `.gql.toml` declaring `root = true` in `rel_path`.
    pub fn create_root_config(&self, rel_path: &str) -> PathBuf {
        self.create_config_with_content(rel_path, "root = true\n")
    }
}
