//! Implementation of `gql filters`.

use std::process::ExitCode;

use gql_highlight::highlight_filter;

use crate::cli::{
    context::CommandContext,
    output::{dim, header, warning},
};

/// Lists saved filters with their expansions and where they were defined.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let filters = &ctx.config.filters;
    if filters.is_empty() {
        println!("No saved filters.");
        println!("Add them under [filters] in .gql.toml; run 'gql init' to create one.");
        return ExitCode::SUCCESS;
    }

    for filter in filters.values() {
        let name = format!("@{}", filter.name);
        let expression = filter.expression();
        let scope = if filter.is_global { "global" } else { "local" };
        let source = format!("{} ({scope})", filter.source.display());
        if ctx.color {
            println!("{}  {}", header(&name), highlight_filter(&expression));
            println!("    {}", dim(&source));
        } else {
            println!("{name}  {expression}");
            println!("    {source}");
        }
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
