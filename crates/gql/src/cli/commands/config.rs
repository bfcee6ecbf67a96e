//! Implementation of `gql config`.

use std::process::ExitCode;

use gql_config::discover_config_files;
use gql_highlight::Highlighter;

use crate::cli::{
    context::CommandContext,
    output::{dim, warning},
};

/// Shows effective configuration settings and any configuration warnings.
///
/// The files that contributed are listed first as TOML comments.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let files = discover_config_files(&ctx.cwd);
    let mut sources = String::new();
    if files.is_empty() {
        sources.push_str("# no configuration files found; showing defaults\n");
    }
    for path in &files {
        sources.push_str(&format!("# {}\n", path.display()));
    }

    let settings = ctx.config.settings_to_toml();
    if ctx.color {
        print!("{}", dim(&sources));
        print!("{}", Highlighter::new().highlight_toml(&settings));
    } else {
        print!("{sources}{settings}");
    }

    for w in ctx.config.validate() {
        if ctx.color {
            eprintln!("{} {w}", warning("warning:"));
        } else {
            eprintln!("warning: {w}");
        }
    }

    ExitCode::SUCCESS
}
