//! # bvar-cli — CLI Tool for Broker Variables
//!
//! Provides the `bvar` command-line interface over `bvar-core` and
//! `bvar-schema`.
//!
//! ## Subcommands
//!
//! - `bvar check`: Descriptor well-formedness check for a variables file.
//! - `bvar schema`: Print the JSON Schema generated from a variables file.
//! - `bvar validate`: Validate a parameters file, optionally defaulting it first.
//! - `bvar label`: Show the display label for field names.
//!
//! ```bash
//! bvar check plans/mysql.yaml
//! bvar schema plans/mysql.yaml --compact
//! bvar validate plans/mysql.yaml request.json --apply-defaults --print
//! bvar label instance_id jdbc-url
//! ```
//!
//! ## Crate Policy
//!
//! - Handler functions delegate to the library crates; no business logic here.
//! - Handlers return the process exit code: 0 when the input is valid,
//!   1 when it is not. Load failures propagate as errors.

pub mod check;
pub mod label;
pub mod schema;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use bvar_core::{validate_variables, BrokerVariable, DescriptorErrors};

/// Load a variables file and check every descriptor in it.
///
/// The outer `Result` carries load failures; the inner one carries
/// descriptor problems, which callers report as invalid input.
pub fn load_checked_variables(
    path: &Path,
) -> Result<std::result::Result<Vec<BrokerVariable>, DescriptorErrors>> {
    let variables = bvar_schema::load_variables(path)
        .with_context(|| format!("failed to load variables from {}", path.display()))?;
    Ok(validate_variables(&variables).map(|()| variables))
}
