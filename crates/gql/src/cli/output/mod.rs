//! Rendering helpers shared by the commands.

use std::process::ExitCode;

pub use gql_highlight::{dim, header, warning};
use gql_highlight::{Highlighter, error_context};
use gql_query::SyntaxError;
use serde_json::Value;

use crate::cli::context::CommandContext;

/// Prints a JSON value to stdout, highlighted when color is on.
pub fn print_json(ctx: &CommandContext, value: &Value, pretty: bool) -> Result<(), ExitCode> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let text = match rendered {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            return Err(ExitCode::FAILURE);
        }
    };

    if ctx.color {
        println!("{}", Highlighter::new().highlight_json(&text));
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Formats a syntax error with its caret context.
pub fn format_syntax_error(ctx: &CommandContext, err: &SyntaxError) -> String {
    if ctx.color {
        error_context(err)
    } else {
        err.format_with_context()
    }
}

/// Prints a syntax error to stderr, prefixed with `error:`.
pub fn report_syntax_error(ctx: &CommandContext, err: &SyntaxError) {
    eprintln!("error: {}", format_syntax_error(ctx, err));
}
