//! # Check Subcommand
//!
//! Reports every malformed descriptor in a variables file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::load_checked_variables;

/// Arguments for the `bvar check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Variables file (YAML or JSON).
    pub variables: PathBuf,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    match load_checked_variables(&args.variables)? {
        Ok(variables) => {
            println!("ok: {} variable(s)", variables.len());
            Ok(0)
        }
        Err(errs) => {
            println!("invalid: {errs}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> u8 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.yaml");
        std::fs::write(&path, content).unwrap();
        run_check(&CheckArgs { variables: path }).unwrap()
    }

    #[test]
    fn valid_catalog_exits_zero() {
        assert_eq!(run("- field_name: a\n  type: boolean\n  details: A.\n"), 0);
    }

    #[test]
    fn invalid_catalog_exits_one() {
        assert_eq!(run("- field_name: a\n  type: boolean\n  details: ''\n"), 1);
    }

    #[test]
    fn unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = CheckArgs {
            variables: dir.path().join("missing.yaml"),
        };
        assert!(run_check(&args).is_err());
    }
}
