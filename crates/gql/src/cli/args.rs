//! Clap argument definitions for the `gql` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gql_config::ColorMode;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "gql")]
#[command(about = "Parse, check and format GQL filter expressions")]
pub struct Cli {
    /// When to use colors [default: from config, else auto]
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Values accepted by `--color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when writing to a terminal.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Arguments for `gql parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Filters to compile ('-' reads stdin, '@name' uses a saved filter)
    #[arg(required = true)]
    pub filters: Vec<String>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Always print the statements shape
    #[arg(long)]
    pub statements: bool,

    /// Dump tokens and the statement tree to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Arguments for `gql check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Filters to validate ('-' reads stdin, '@name' uses a saved filter)
    #[arg(required = true)]
    pub filters: Vec<String>,
}

/// Arguments for commands taking one filter.
#[derive(Args, Debug, Clone)]
pub struct FilterArg {
    /// Filter expression ('-' reads stdin, '@name' uses a saved filter)
    pub filter: String,
}

/// Arguments for `gql init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.gql.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `gql` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile filters to JSON
    #[command(after_help = "\
FILTER SYNTAX:
  prop:value             Equality
  prop:-value            Not equal
  prop:>5 prop:<=5       Comparison (>, <, >=, <=)
  prop:[a,b]             In list (prop:-[a,b] for not in)
  prop:null              Null check (prop:-null for not null)
  a:1+b:2                AND
  a:1,b:2                OR
  a:1+(b:2,c:3)          Grouping

  Values are barewords, numbers, true, false, null or 'quoted strings'.

EXAMPLES:
  gql parse 'tag:photo'
  gql parse 'author:-joe+(tag:photo,image:-null)'
  gql parse --statements 'count:>5'
  echo 'tag:[a,b]' | gql parse -")]
    Parse(ParseCommand),

    /// Print the token stream of a filter
    Tokens(FilterArg),

    /// Check that filters parse
    Check(CheckCommand),

    /// Print a filter in canonical form
    Fmt(FilterArg),

    /// List saved filters
    Filters,

    /// Initialize gql configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::try_parse_from(["gql", "parse", "--compact", "-v", "a:1", "@saved"]).unwrap();
        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse");
        };
        assert!(cmd.compact);
        assert!(cmd.verbose);
        assert!(!cmd.statements);
        assert_eq!(cmd.filters, vec!["a:1", "@saved"]);
    }

    #[test]
    fn global_color_flag() {
        let cli = Cli::try_parse_from(["gql", "fmt", "a:1", "--color", "never"]).unwrap();
        assert_eq!(cli.color, Some(ColorChoice::Never));
        assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    }

    #[test]
    fn parse_requires_a_filter() {
        assert!(Cli::try_parse_from(["gql", "parse"]).is_err());
    }

    #[test]
    fn dash_is_a_filter_argument() {
        let cli = Cli::try_parse_from(["gql", "check", "-"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(cmd) if cmd.filters == vec!["-"]));
    }
}
