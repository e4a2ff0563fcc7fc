//! # Schema Subcommand
//!
//! Prints the JSON Schema document generated from a variables file.
//! Malformed descriptors are reported instead of producing a schema.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use bvar_schema::create_json_schema;

use crate::load_checked_variables;

/// Arguments for the `bvar schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Variables file (YAML or JSON).
    pub variables: PathBuf,

    /// Print the schema on one line instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let variables = match load_checked_variables(&args.variables)? {
        Ok(variables) => variables,
        Err(errs) => {
            println!("invalid: {errs}");
            return Ok(1);
        }
    };

    let schema = create_json_schema(&variables);
    println!("{}", render_schema(&schema, args.compact)?);
    Ok(0)
}

/// Serialize a schema document, pretty unless `compact`.
pub fn render_schema(schema: &Value, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(schema)
    } else {
        serde_json::to_string_pretty(schema)
    };
    rendered.context("failed to serialize schema")
}
