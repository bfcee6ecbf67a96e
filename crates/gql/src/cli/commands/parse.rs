//! Implementation of `gql parse`.

use std::process::ExitCode;

use gql_config::OutputShape;
use gql_query::{Filter, parse, parse_statements, tokenize};

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{dim, print_json, report_syntax_error},
};

/// Compiles each filter and prints its JSON.
///
/// Every filter is attempted; the exit status is a failure if any of them failed.
pub fn run(ctx: &mut CommandContext, cmd: &ParseCommand) -> ExitCode {
    let pretty = ctx.config.output.pretty && !cmd.compact;
    let statements = cmd.statements || ctx.config.output.shape == OutputShape::Statements;
    let mut status = ExitCode::SUCCESS;

    for arg in &cmd.filters {
        let text = match ctx.filter_text(arg) {
            Ok(text) => text,
            Err(code) => {
                status = code;
                continue;
            }
        };

        if cmd.verbose {
            dump(ctx, &text);
        }

        match parse(&text) {
            Ok(filter) => {
                let filter = if statements {
                    Filter::Combined(filter.into_statements())
                } else {
                    filter
                };
                if let Err(code) = print_json(ctx, &filter.to_json(), pretty) {
                    status = code;
                }
            }
            Err(err) => {
                report_syntax_error(ctx, &err);
                status = ExitCode::FAILURE;
            }
        }
    }

    status
}

/// Writes the token stream and statement tree of `text` to stderr.
fn dump(ctx: &CommandContext, text: &str) {
    let heading = |s: &str| if ctx.color { dim(s) } else { s.to_string() };

    eprintln!("{}", heading(&format!("filter: {text}")));
    if let Ok(tokens) = tokenize(text) {
        eprintln!("{}", heading("tokens:"));
        for token in tokens {
            eprintln!("{token}");
        }
    }
    if let Ok(statements) = parse_statements(text) {
        eprintln!("{}", heading("statements:"));
        for statement in statements {
            eprint!("{statement}");
        }
    }
}
