//! # Error Types — Descriptor Problems
//!
//! Errors raised while checking a [`BrokerVariable`](crate::BrokerVariable)
//! for well-formedness. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every problem names the field path it was found at (`details`,
//!   `variables[3].field_name`).
//! - Problems are collected into [`DescriptorErrors`] instead of returning
//!   on the first one.
//! - Aggregates render on a single line so they can be embedded in logs
//!   and API responses unchanged.

use std::fmt::Display;

use thiserror::Error;

/// A single problem with one descriptor field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A field that must carry text is empty or whitespace.
    #[error("missing field(s): {field}")]
    BlankField {
        /// Path of the blank field.
        field: String,
    },

    /// The declared type is not one of the JSON Schema primitives.
    #[error("field must be one of string, number, integer, boolean but got {value:?}: {field}")]
    InvalidSchemaType {
        /// Path of the type field.
        field: String,
        /// The rejected type name.
        value: String,
    },
}

impl FieldError {
    /// Path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::BlankField { field } | Self::InvalidSchemaType { field, .. } => field,
        }
    }

    /// Re-root the field path under `parent[index]`.
    pub fn via_field_index(self, parent: &str, index: usize) -> Self {
        let prefix = |field: String| format!("{parent}[{index}].{field}");
        match self {
            Self::BlankField { field } => Self::BlankField {
                field: prefix(field),
            },
            Self::InvalidSchemaType { field, value } => Self::InvalidSchemaType {
                field: prefix(field),
                value,
            },
        }
    }
}

/// Every problem found in one descriptor or one catalog of descriptors.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", render_single_line(.errors))]
pub struct DescriptorErrors {
    errors: Vec<FieldError>,
}

impl DescriptorErrors {
    /// Record another problem.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns the number of problems.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all problems, in the order they were found.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Re-root every path under `parent[index]`.
    pub fn via_field_index(self, parent: &str, index: usize) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|e| e.via_field_index(parent, index))
                .collect(),
        }
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<FieldError> for DescriptorErrors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for DescriptorErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Collapse a possibly multi-line message onto one line.
///
/// Line breaks and the indentation around them become a single space.
pub fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a list of errors as `"<n> error(s) occurred: a; b; c"`.
///
/// Each item is passed through [`single_line`] first, so the result never
/// contains a line break.
pub fn render_single_line<T: Display>(items: &[T]) -> String {
    let points: Vec<String> = items
        .iter()
        .map(|item| single_line(&item.to_string()))
        .collect();
    format!("{} error(s) occurred: {}", points.len(), points.join("; "))
}
