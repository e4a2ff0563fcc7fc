//! # bvar-schema — Parameter Schemas & Validation
//!
//! Turns a catalog of [`BrokerVariable`](bvar_core::BrokerVariable)
//! descriptors into a JSON Schema (draft-04) document and checks
//! parameter payloads against it.
//!
//! ## Pipeline
//!
//! ```text
//! [BrokerVariable] --create_json_schema--> schema document
//!                                               |
//! payload --apply_defaults (optional)--> validate_against_schema --> Ok / violations
//! ```
//!
//! - [`builder`]: per-variable schema fragments and the full document.
//! - [`defaults`]: fills absent parameters from declared defaults.
//! - [`validate`]: runs the `jsonschema` engine and aggregates every
//!   violation into one [`SchemaValidationError::ValidationFailed`].
//! - [`document`]: loads catalogs and payloads from YAML or JSON files.
//!
//! ## Crate Policy
//!
//! - Depends only on `bvar-core` internally.
//! - Schemas are built fresh on every call; nothing is cached or shared.
//! - The only mutation is [`apply_defaults`] on the payload it is handed.

pub mod builder;
pub mod defaults;
pub mod document;
pub mod validate;

pub use builder::{create_json_schema, variable_schema, DRAFT_04_SCHEMA};
pub use defaults::apply_defaults;
pub use document::{load_parameters, load_variables};
pub use validate::{
    validate_against_schema, validate_parameters, SchemaValidationError, ValidationViolations,
    Violation,
};
