//! Describe command implementation.

use std::io::Write;

use clap::Parser;
use vrp_params_core::FieldDoc;
use vrp_params_schema::RequestSchema;

use crate::CliError;

/// CLI arguments for the `describe` subcommand.
#[derive(Debug, Clone, Parser, Default)]
#[command(about = "Print the published request fields as JSON")]
pub(crate) struct DescribeArgs {
    /// Only list fields whose path starts with this prefix.
    #[arg(long, value_name = "path")]
    pub(crate) prefix: Option<String>,
}

pub(crate) fn run_describe(args: &DescribeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_describe_with(args, &mut stdout)
}

pub(crate) fn run_describe_with(
    args: &DescribeArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let docs: Vec<FieldDoc> = RequestSchema::shared()
        .describe()
        .into_iter()
        .filter(|doc| {
            args.prefix
                .as_deref()
                .is_none_or(|prefix| is_under(&doc.path, prefix))
        })
        .collect();
    let payload = serde_json::to_string_pretty(&docs).map_err(CliError::SerializeOutput)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
}

/// Whether `path` is `prefix` itself or lies below it.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['.', '[']))
}
