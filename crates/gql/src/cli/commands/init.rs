//! Implementation of `gql init`.

use std::{fs, process::ExitCode};

use gql_config::{CONFIG_FILENAME, ConfigError, global_config_path, global_template, local_template};
use gql_highlight::Highlighter;

use crate::cli::{args::InitCommand, context::CommandContext, output::header};

/// Writes a commented `.gql.toml` template.
///
/// Running in the home directory writes the global template even without `--global`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(|p| p.parent())
        .is_some_and(|home| home == ctx.cwd);
    let use_global = cmd.global || in_home;

    let config_path = if use_global {
        match global_path {
            Some(path) => path,
            None => {
                eprintln!("error: {}", ConfigError::NoHomeDirectory);
                return ExitCode::FAILURE;
            }
        }
    } else {
        ctx.cwd.join(CONFIG_FILENAME)
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if use_global {
        global_template()
    } else {
        local_template()
    };

    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    if ctx.color {
        println!();
        println!("{}", header("Configuration written:"));
        print!("{}", Highlighter::new().highlight_toml(&template));
        println!();
    }

    ExitCode::SUCCESS
}
