//! Command-line interface for the `gql` filter tool.

use std::process::ExitCode;

use clap::Parser;
use gql::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = cli.color.map(Into::into);

    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only(color)
    } else {
        CommandContext::load(color)
    };

    match ctx {
        Ok(mut ctx) => commands::run(cli.command, &mut ctx),
        Err(code) => code,
    }
}
