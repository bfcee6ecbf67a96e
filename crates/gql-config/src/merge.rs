//! Combining several parsed files into one [`Config`].

use std::path::PathBuf;

use crate::{
    Config, OutputSettings, SavedFilter,
    discovery::is_global_config,
    parse::{RawConfig, RawOutputSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files given most specific first.
///
/// For each output setting the first file that sets it wins. Saved filters are merged
/// by name and the first definition wins as a whole.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut output = OutputSettings::default();
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.output {
            apply_output(&mut output, raw);
        }
    }

    let mut config = Config {
        output,
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(|p| p.to_path_buf()),
        ..Config::default()
    };

    for parsed in configs {
        let Some(filters) = &parsed.config.filters else {
            continue;
        };
        let is_global = is_global_config(&parsed.path);
        for (name, parts) in filters {
            config
                .filters
                .entry(name.clone())
                .or_insert_with(|| SavedFilter {
                    name: name.clone(),
                    parts: parts.clone(),
                    source: parsed.path.clone(),
                    is_global,
                });
        }
    }

    config
}

/// Overwrites the settings present in `raw`.
fn apply_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.pretty {
        result.pretty = v;
    }
    if let Some(v) = raw.color {
        result.color = v;
    }
    if let Some(v) = raw.shape {
        result.shape = v;
    }
}
