//! Command-line interface for checking VRP requests offline.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod check;
mod describe;
mod error;
mod fs;

use check::{CheckArgs, run_check};
use describe::{DescribeArgs, run_describe};
pub use error::CliError;

pub(crate) const ARG_CHECK_REQUEST: &str = "request";
pub(crate) const ENV_CHECK_REQUEST: &str = "VRP_PARAMS_CMDS_CHECK_REQUEST";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are unusable, the
/// request cannot be read, or the request fails validation.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    log::debug!("dispatching {:?}", cli.command);
    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Describe(args) => run_describe(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vrp-params",
    about = "Validate and normalize VRP optimisation requests",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a request file and print its normalized form.
    Check(CheckArgs),
    /// Print the published request fields as JSON.
    Describe(DescribeArgs),
}

#[cfg(test)]
mod tests;
