//! Evseq CLI Library
//!
//! Command-line interface for validating recorded event traces against the
//! Evseq grammar tables.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, DeviceArg, FormatArg, GrammarArgs, LintArgs, PlatformArg, ShapeArg,
    TableArgs, ValidateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use handlers::Verdict;
pub use output::{OutputFormat, Reporter};

/// Build configuration from parsed arguments
#[must_use]
pub fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
        .with_log_json(cli.log_json)
}

/// Dispatch a parsed command
pub fn run(cli: &Cli, config: &CliConfig) -> CliResult<Verdict> {
    let use_color = config.color.should_color();
    console::set_colors_enabled(use_color);
    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());

    match &cli.command {
        Commands::Validate(args) => handlers::execute_validate(args, &reporter),
        Commands::Grammar(args) => handlers::execute_grammar(args, &reporter),
        Commands::Table(args) => handlers::execute_table(args, &reporter),
        Commands::Lint(args) => handlers::execute_lint(args, &reporter),
    }
}
