//! # Validate Subcommand
//!
//! Checks a parameters file against the schema generated from a variables
//! file, optionally filling defaults first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use bvar_schema::{apply_defaults, load_parameters, validate_parameters, SchemaValidationError};

use crate::load_checked_variables;

/// Arguments for the `bvar validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Variables file (YAML or JSON).
    pub variables: PathBuf,

    /// Parameters file (YAML or JSON) whose top level is a mapping.
    pub parameters: PathBuf,

    /// Fill absent parameters from variable defaults before validating.
    #[arg(long)]
    pub apply_defaults: bool,

    /// Print the (defaulted) parameters as JSON when they are valid.
    #[arg(long)]
    pub print: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let variables = match load_checked_variables(&args.variables)? {
        Ok(variables) => variables,
        Err(errs) => {
            println!("invalid variables: {errs}");
            return Ok(1);
        }
    };

    let mut parameters = load_parameters(&args.parameters).with_context(|| {
        format!("failed to load parameters from {}", args.parameters.display())
    })?;

    if args.apply_defaults {
        apply_defaults(&mut parameters, &variables);
    }

    let payload = Value::Object(parameters);
    match validate_parameters(&payload, &variables) {
        Ok(()) => {
            println!("valid");
            if args.print {
                let rendered = serde_json::to_string_pretty(&payload)
                    .context("failed to serialize parameters")?;
                println!("{rendered}");
            }
            Ok(0)
        }
        Err(SchemaValidationError::ValidationFailed(violations)) => {
            tracing::info!(violations = violations.len(), "parameters rejected");
            println!("invalid: {violations}");
            Ok(1)
        }
        Err(e) => Err(e).context("schema validation could not run"),
    }
}
