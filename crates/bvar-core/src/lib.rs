//! # bvar-core — Broker Variable Model
//!
//! Leaf crate of the workspace. Defines the typed description of one
//! configurable service parameter (a "broker variable") and the rules a
//! well-formed description must follow. Schema generation and payload
//! validation live in `bvar-schema`; this crate never touches a payload.
//!
//! ## Contents
//!
//! - [`BrokerVariable`]: name, JSON type, description, default, enumeration
//!   and raw JSON Schema constraints for one field.
//! - [`field_name_to_label`]: turns `instance_id` into `Instance ID`.
//! - [`FieldError`] / [`DescriptorErrors`]: descriptor problems, collected
//!   rather than short-circuited so a catalog is fixed in one pass.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bvar-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Descriptors are plain values: created by the caller, never mutated here.

pub mod error;
pub mod label;
pub mod variable;

pub use error::{render_single_line, single_line, DescriptorErrors, FieldError};
pub use label::field_name_to_label;
pub use variable::{validate_variables, BrokerVariable, EnumValue, Enumeration, JsonType};
