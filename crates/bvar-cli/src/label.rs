//! # Label Subcommand
//!
//! Prints the schema title a field name would get.

use anyhow::Result;
use clap::Args;

use bvar_core::field_name_to_label;

/// Arguments for the `bvar label` subcommand.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Field names to label.
    #[arg(required = true)]
    pub field_names: Vec<String>,
}

/// Execute the label subcommand.
pub fn run_label(args: &LabelArgs) -> Result<u8> {
    print!("{}", render_labels(&args.field_names));
    Ok(0)
}

/// One `name<TAB>label` line per field name, in argument order.
pub fn render_labels(field_names: &[String]) -> String {
    field_names
        .iter()
        .map(|name| format!("{name}\t{}\n", field_name_to_label(name)))
        .collect()
}
