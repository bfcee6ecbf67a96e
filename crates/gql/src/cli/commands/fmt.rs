//! Implementation of `gql fmt`.

use std::process::ExitCode;

use gql_highlight::highlight_filter;
use gql_query::parse;

use crate::cli::{args::FilterArg, context::CommandContext, output::report_syntax_error};

/// Prints the canonical rendering of a filter.
pub fn run(ctx: &mut CommandContext, cmd: &FilterArg) -> ExitCode {
    let text = match ctx.filter_text(&cmd.filter) {
        Ok(text) => text,
        Err(code) => return code,
    };

    match parse(&text) {
        Ok(filter) => {
            let canonical = filter.to_string();
            if ctx.color {
                println!("{}", highlight_filter(&canonical));
            } else {
                println!("{canonical}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_syntax_error(ctx, &err);
            ExitCode::FAILURE
        }
    }
}
