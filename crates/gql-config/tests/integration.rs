//! Loading configuration from real directory trees.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use gql_config::{ColorMode, Config, ConfigError, ConfigWarning, OutputShape};

/// A scratch project tree.
struct TestEnv {
    /// Backing temporary directory.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

/// Drops filters that come from the user's real `~/.gql.toml`.
fn local_filter_names(config: &Config) -> Vec<&str> {
    config
        .filters
        .values()
        .filter(|f| !f.is_global)
        .map(|f| f.name.as_str())
        .collect()
}

#[test]
fn test_single_file() {
    let env = TestEnv::new();
    env.create_file(
        ".gql.toml",
        r#"
root = true

[output]
pretty = false
shape = "statements"

[filters]
featured = "featured:true+image:-null"
"#,
    );

    let config = Config::load(env.path()).unwrap();
    assert!(!config.output.pretty);
    assert_eq!(config.output.shape, OutputShape::Statements);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
    assert_eq!(
        config.resolve_filter("@featured").unwrap(),
        "featured:true+image:-null"
    );
}

#[test]
fn test_nested_files_merge() {
    let env = TestEnv::new();
    env.create_file(
        ".gql.toml",
        r#"
root = true

[output]
color = "never"
pretty = false

[filters]
shared = "tag:outer"
outer = "author:joe"
"#,
    );
    env.create_file(
        "site/.gql.toml",
        r#"
[output]
pretty = true

[filters]
shared = ["tag:inner", "featured:true"]
"#,
    );
    let cwd = env.create_dir("site/content");

    let config = Config::load(&cwd).unwrap();
    assert!(config.output.pretty);
    assert_eq!(config.output.color, ColorMode::Never);
    assert_eq!(config.config_root, Some(env.path().join("site")));
    assert_eq!(local_filter_names(&config), vec!["outer", "shared"]);
    assert_eq!(
        config.resolve_filter("@shared").unwrap(),
        "tag:inner+featured:true"
    );
    assert_eq!(
        config.filters["outer"].source,
        env.path().join(".gql.toml")
    );
}

#[test]
fn test_root_hides_outer_files() {
    let env = TestEnv::new();
    env.create_file(".gql.toml", "[filters]\nhidden = \"a:1\"\n");
    env.create_file("app/.gql.toml", "root = true\n[filters]\nseen = \"b:2\"\n");

    let config = Config::load(&env.path().join("app")).unwrap();
    assert_eq!(config.filters.keys().collect::<Vec<_>>(), vec!["seen"]);
}

#[test]
fn test_load_from_files_precedence() {
    let env = TestEnv::new();
    let near = env.create_file("near.toml", "[output]\ncolor = \"always\"\n");
    let far = env.create_file("far.toml", "[output]\ncolor = \"never\"\npretty = false\n");

    let config = Config::load_from_files(&[near, far]).unwrap();
    assert_eq!(config.output.color, ColorMode::Always);
    assert!(!config.output.pretty);
}

#[test]
fn test_load_from_files_empty_list() {
    let config = Config::load_from_files(&[]).unwrap();
    assert!(config.filters.is_empty());
    assert!(config.output.pretty);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let env = TestEnv::new();
    let path = env.create_file(".gql.toml", "root = true\n[filters\n");

    let err = Config::load(env.path()).unwrap_err();
    match err {
        ConfigError::ParseToml { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validation_reports_bad_filters() {
    let env = TestEnv::new();
    env.create_file(
        ".gql.toml",
        r#"
root = true

[filters]
good = "tag:photo"
broken = "id:[test"
nested = "@good"
"#,
    );

    let config = Config::load(env.path()).unwrap();
    let warnings = config.validate();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| matches!(
        w,
        ConfigWarning::InvalidFilter { name, error, .. } if name == "broken" && error.position() == 9
    )));
    assert!(warnings
        .iter()
        .any(|w| matches!(w, ConfigWarning::NestedReference { name, .. } if name == "nested")));
}

#[test]
fn test_unknown_filter() {
    let config = Config::default();
    let err = config.resolve_filter("@nope").unwrap_err();
    assert_eq!(err.to_string(), "unknown saved filter: @nope");
}

#[test]
fn test_settings_round_trip() {
    let env = TestEnv::new();
    env.create_file(
        ".gql.toml",
        "root = true\n[output]\nshape = \"statements\"\n[filters]\np = [\"a:1\", \"b:2\"]\n",
    );
    let config = Config::load(env.path()).unwrap();

    let dumped = env.create_file("dump/.gql.toml", &config.settings_to_toml());
    let reloaded = Config::load_from_files(&[dumped]).unwrap();
    assert_eq!(reloaded.output.shape, OutputShape::Statements);
    assert_eq!(reloaded.filters["p"].parts, vec!["a:1", "b:2"]);
}
