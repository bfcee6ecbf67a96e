//! Shared context for running CLI commands.

use std::{
    env,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use gql_config::{ColorMode, Config};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Whether output is colorized.
    pub color: bool,
    /// Whether stdin has already been consumed by a `-` argument.
    stdin_used: bool,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    ///
    /// `color` overrides the configured color mode.
    pub fn load(color: Option<ColorMode>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self::new(cwd, config, color))
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(color: Option<ColorMode>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self::new(cwd, Config::default(), color))
    }

    /// Builds a context, resolving the color mode against the terminal.
    fn new(cwd: PathBuf, config: Config, color: Option<ColorMode>) -> Self {
        let color = match color.unwrap_or(config.output.color) {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stdout().is_terminal(),
        };
        Self {
            cwd,
            config,
            color,
            stdin_used: false,
        }
    }

    /// Turns a filter argument into filter text.
    ///
    /// `-` reads stdin (once) and `@name` expands a saved filter; anything else is used as
    /// written.
    pub fn filter_text(&mut self, arg: &str) -> Result<String, ExitCode> {
        if arg == "-" {
            return self.read_stdin();
        }
        self.config.resolve_filter(arg).map_err(|e| {
            eprintln!("error: {e}");
            if self.config.filters.is_empty() {
                eprintln!("No saved filters are defined. Run 'gql init' to create a configuration file.");
            }
            ExitCode::FAILURE
        })
    }

    /// Reads a filter from stdin, dropping the trailing line break.
    fn read_stdin(&mut self) -> Result<String, ExitCode> {
        if self.stdin_used {
            eprintln!("error: '-' can only be given once");
            return Err(ExitCode::FAILURE);
        }
        self.stdin_used = true;

        let mut input = String::new();
        io::stdin().read_to_string(&mut input).map_err(|e| {
            eprintln!("error: failed to read stdin: {e}");
            ExitCode::FAILURE
        })?;
        Ok(input.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
