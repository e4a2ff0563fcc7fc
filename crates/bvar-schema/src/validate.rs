//! # Parameter Validation
//!
//! Runtime validation of parameter payloads against the JSON Schema
//! generated from their broker variables (draft-04).
//!
//! ## Error Aggregation
//!
//! Validation never stops at the first problem. Every violation the
//! engine reports is collected into one [`ValidationViolations`] value and
//! returned as [`SchemaValidationError::ValidationFailed`]. Its display
//! form is a single line:
//!
//! ```text
//! 2 error(s) occurred: (root): "size" is a required property; /tier: "gold" is not one of ["basic","premium"]
//! ```
//!
//! A schema the engine cannot compile is a different failure,
//! [`SchemaValidationError::EngineError`], reported immediately.

use std::fmt;

use jsonschema::Draft;
use serde_json::Value;
use thiserror::Error;

use bvar_core::{render_single_line, single_line, BrokerVariable};

use crate::builder::create_json_schema;

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The payload did not conform to the schema.
    #[error("{0}")]
    ValidationFailed(ValidationViolations),

    /// The engine could not compile the schema.
    #[error("schema engine error: {reason}")]
    EngineError {
        /// Reason reported by the engine.
        reason: String,
    },

    /// A variables or parameters file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the payload.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Engine description of the violation, on one line.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations, in engine order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_single_line(&self.violations))
    }
}

/// Validate `parameters` against the schema generated from `variables`.
///
/// # Errors
///
/// See [`validate_against_schema`].
pub fn validate_parameters(
    parameters: &Value,
    variables: &[BrokerVariable],
) -> Result<(), SchemaValidationError> {
    let schema = create_json_schema(variables);
    validate_against_schema(parameters, &schema)
}

/// Validate `parameters` against a draft-04 schema document.
///
/// # Errors
///
/// Returns `SchemaValidationError::EngineError` if the schema cannot be
/// compiled (for example a constraint with a value of the wrong kind).
/// Returns `SchemaValidationError::ValidationFailed` carrying every
/// violation if the payload does not conform.
pub fn validate_against_schema(
    parameters: &Value,
    schema: &Value,
) -> Result<(), SchemaValidationError> {
    let mut opts = jsonschema::options();
    opts.with_draft(Draft::Draft4);
    let validator = opts
        .build(schema)
        .map_err(|e| SchemaValidationError::EngineError {
            reason: single_line(&e.to_string()),
        })?;

    let violations: Vec<Violation> = validator
        .iter_errors(parameters)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: single_line(&e.to_string()),
        })
        .collect();

    tracing::debug!(violations = violations.len(), "validated parameters");

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed(
            ValidationViolations { violations },
        ))
    }
}
