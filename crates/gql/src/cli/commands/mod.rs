//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod filters;
pub mod fmt;
pub mod init;
pub mod parse;
pub mod tokens;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Parse(cmd) => parse::run(ctx, &cmd),
        Commands::Tokens(cmd) => tokens::run(ctx, &cmd),
        Commands::Check(cmd) => check::run(ctx, &cmd),
        Commands::Fmt(cmd) => fmt::run(ctx, &cmd),
        Commands::Filters => filters::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
