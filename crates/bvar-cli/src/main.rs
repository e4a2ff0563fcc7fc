//! # bvar CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bvar_cli::check::{run_check, CheckArgs};
use bvar_cli::label::{run_label, LabelArgs};
use bvar_cli::schema::{run_schema, SchemaArgs};
use bvar_cli::validate::{run_validate, ValidateArgs};

/// Broker variable toolchain.
///
/// Checks variable descriptors, generates the JSON Schema for a plan's
/// parameters, and validates provision parameters against it.
#[derive(Parser, Debug)]
#[command(name = "bvar", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that every variable descriptor is well-formed.
    Check(CheckArgs),

    /// Print the JSON Schema generated from a variables file.
    Schema(SchemaArgs),

    /// Validate parameters against the schema of a variables file.
    Validate(ValidateArgs),

    /// Show the display label for field names.
    Label(LabelArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "bvar starting");

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Schema(args) => run_schema(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Label(args) => run_label(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
