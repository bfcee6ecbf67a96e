//! Implementation of `gql check`.

use std::process::ExitCode;

use gql_highlight::success;
use gql_query::parse;

use crate::cli::{
    args::CheckCommand,
    context::CommandContext,
    output::format_syntax_error,
};

/// Validates each filter, printing `ok` or the error with context.
pub fn run(ctx: &mut CommandContext, cmd: &CheckCommand) -> ExitCode {
    let mut failed = false;
    let label = cmd.filters.len() > 1;

    for arg in &cmd.filters {
        let text = match ctx.filter_text(arg) {
            Ok(text) => text,
            Err(_) => {
                failed = true;
                continue;
            }
        };
        let prefix = if label { format!("{arg}: ") } else { String::new() };

        match parse(&text) {
            Ok(_) if ctx.color => println!("{prefix}{}", success("ok")),
            Ok(_) => println!("{prefix}ok"),
            Err(err) => {
                failed = true;
                println!("{prefix}{}", format_syntax_error(ctx, &err));
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
