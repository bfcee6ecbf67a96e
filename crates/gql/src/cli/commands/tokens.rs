//! Implementation of `gql tokens`.

use std::process::ExitCode;

use gql_query::tokenize;

use crate::cli::{
    args::FilterArg,
    context::CommandContext,
    output::{header, report_syntax_error},
};

/// Prints one line per token: 1-based offset, kind and source text.
pub fn run(ctx: &mut CommandContext, cmd: &FilterArg) -> ExitCode {
    let text = match ctx.filter_text(&cmd.filter) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let tokens = match tokenize(&text) {
        Ok(tokens) => tokens,
        Err(err) => {
            report_syntax_error(ctx, &err);
            return ExitCode::FAILURE;
        }
    };

    let title = format!("{:>4}  {:<10} {}", "CHAR", "KIND", "TEXT");
    if ctx.color {
        println!("{}", header(&title));
    } else {
        println!("{title}");
    }
    for token in tokens {
        println!("{token}");
    }
    ExitCode::SUCCESS
}
