//! Starter files written by `gql init`.
//!
//! The templates are kept as real TOML so they can be checked by the config parser, and
//! every setting is commented out when handed to the user.

/// Project-local template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.gql.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the project-local template with every setting commented out.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global template with every setting commented out.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{Config, ParsedConfig, merge_configs, parse::parse_config_str};

    fn load(template: &str) -> Config {
        let path = Path::new("template.toml");
        merge_configs(&[ParsedConfig {
            path: path.to_path_buf(),
            config: parse_config_str(template, path).unwrap(),
        }])
    }

    #[test]
    fn templates_are_valid_and_their_filters_parse() {
        for template in [LOCAL_TEMPLATE, GLOBAL_TEMPLATE] {
            let config = load(template);
            assert!(!config.filters.is_empty());
            assert!(config.validate().is_empty(), "{:?}", config.validate());
        }
    }

    #[test]
    fn rendered_templates_set_nothing() {
        for template in [local_template(), global_template()] {
            let config = load(&template);
            assert!(config.filters.is_empty());
            assert!(config.output.pretty);
        }
    }

    #[test]
    fn comments_and_blank_lines_survive() {
        let result = comment_template("# note\n\n[output]\npretty = true\n");
        assert_eq!(result, "# note\n\n# [output]\n# pretty = true\n");
    }
}
