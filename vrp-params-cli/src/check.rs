//! Check command implementation.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vrp_params_core::ValidationErrors;
use vrp_params_schema::RequestSchema;

use crate::fs::{file_is_file, open_utf8_file};
use crate::{ARG_CHECK_REQUEST, CliError, ENV_CHECK_REQUEST};

/// CLI arguments for the `check` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Validate a JSON-encoded VRP request against the request \
                 schema. A conforming request is printed in normalized form; \
                 otherwise every violation is printed on its own line.",
    about = "Validate a VRP request"
)]
#[ortho_config(prefix = "VRP_PARAMS")]
pub(crate) struct CheckArgs {
    /// Path to a JSON file containing a VRP request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request: Option<Utf8PathBuf>,
    /// Print the normalized request on a single line.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) compact: bool,
}

impl CheckArgs {
    pub(crate) fn into_config(self) -> Result<CheckConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CheckConfig::try_from(merged)
    }
}

/// Resolved `check` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckConfig {
    /// Path to the JSON request file.
    pub(crate) request: Utf8PathBuf,
    /// Whether output skips pretty printing.
    pub(crate) compact: bool,
}

impl CheckConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request;
        let field = ARG_CHECK_REQUEST;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<CheckArgs> for CheckConfig {
    type Error = CliError;

    fn try_from(args: CheckArgs) -> Result<Self, Self::Error> {
        let request = args.request.ok_or(CliError::MissingArgument {
            field: ARG_CHECK_REQUEST,
            env: ENV_CHECK_REQUEST,
        })?;
        Ok(Self {
            request,
            compact: args.compact,
        })
    }
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_check_with(args, &mut stdout)
}

/// Validate the configured request, writing the outcome to `writer`.
///
/// Violations are written one per line before the command fails with
/// [`CliError::InvalidRequest`].
pub(crate) fn run_check_with(args: CheckArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let document = load_request(&config.request)?;
    match RequestSchema::shared().validate(&document) {
        Ok(canonical) => write_canonical(writer, &canonical, config.compact),
        Err(errors) => {
            write_violations(writer, &errors)?;
            Err(CliError::InvalidRequest {
                path: config.request,
                errors,
            })
        }
    }
}

/// Loads a JSON document from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<Value, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_canonical(writer: &mut dyn Write, canonical: &Value, compact: bool) -> Result<(), CliError> {
    let payload = if compact {
        serde_json::to_string(canonical)
    } else {
        serde_json::to_string_pretty(canonical)
    }
    .map_err(CliError::SerializeOutput)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
}

fn write_violations(writer: &mut dyn Write, errors: &ValidationErrors) -> Result<(), CliError> {
    for error in errors.iter() {
        writeln!(writer, "{} [{}]", error, error.kind.as_str()).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CheckConfig, CliError> {
    let merged = CheckArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CheckConfig::try_from(merged)
}
