//! # Document Loading
//!
//! Reads variable catalogs and parameter payloads from disk. The format is
//! chosen by extension: `.yaml`/`.yml` are YAML, everything else is JSON.
//!
//! A catalog is either a bare list of variables or a mapping with a
//! `variables` list:
//!
//! ```yaml
//! variables:
//!   - field_name: size_gb
//!     type: integer
//!     details: Disk size in GB.
//! ```
//!
//! YAML catalogs are deserialized directly so that enumeration keys keep
//! their scalar type. YAML payloads are converted to JSON values first.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use bvar_core::BrokerVariable;

use crate::validate::SchemaValidationError;

const CATALOG_SHAPE: &str = "expected a list of variables or a mapping with a `variables` list";

#[derive(Deserialize)]
struct VariablesFile {
    variables: Vec<BrokerVariable>,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn read(path: &Path) -> Result<String, SchemaValidationError> {
    std::fs::read_to_string(path).map_err(|e| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })
}

fn load_error(path: &Path, reason: String) -> SchemaValidationError {
    SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    }
}

/// Load a catalog of broker variables.
///
/// Only parses; run [`bvar_core::validate_variables`] to check the
/// descriptors are well-formed.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read or is not a list of variables (bare or under `variables`). The
/// reason carries the deserializer's message, which names the offending
/// field and its location.
pub fn load_variables(path: &Path) -> Result<Vec<BrokerVariable>, SchemaValidationError> {
    let content = read(path)?;

    let variables = if is_yaml(path) {
        load_yaml_variables(path, &content)?
    } else {
        load_json_variables(path, &content)?
    };

    tracing::debug!(path = %path.display(), count = variables.len(), "loaded variables");
    Ok(variables)
}

// The document is first read untyped to pick the shape, then read again
// from the text so errors keep their path and line.
fn load_yaml_variables(
    path: &Path,
    content: &str,
) -> Result<Vec<BrokerVariable>, SchemaValidationError> {
    let invalid = |e: serde_yaml::Error| load_error(path, format!("invalid variables YAML: {e}"));

    let node: serde_yaml::Value = serde_yaml::from_str(content).map_err(invalid)?;
    match &node {
        serde_yaml::Value::Sequence(_) => serde_yaml::from_str(content).map_err(invalid),
        serde_yaml::Value::Mapping(map) if map.contains_key("variables") => {
            serde_yaml::from_str::<VariablesFile>(content)
                .map(|file| file.variables)
                .map_err(invalid)
        }
        other => Err(load_error(
            path,
            format!("{CATALOG_SHAPE}, got {}", yaml_kind(other)),
        )),
    }
}

fn load_json_variables(
    path: &Path,
    content: &str,
) -> Result<Vec<BrokerVariable>, SchemaValidationError> {
    let invalid = |e: serde_json::Error| load_error(path, format!("invalid variables JSON: {e}"));

    let node: Value = serde_json::from_str(content).map_err(invalid)?;
    match &node {
        Value::Array(_) => serde_json::from_str(content).map_err(invalid),
        Value::Object(map) if map.contains_key("variables") => {
            serde_json::from_str::<VariablesFile>(content)
                .map(|file| file.variables)
                .map_err(invalid)
        }
        other => Err(load_error(
            path,
            format!("{CATALOG_SHAPE}, got {}", json_kind(other)),
        )),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

/// Load a parameter payload.
///
/// The top level must be a mapping. An empty YAML document is an empty
/// payload.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read, parsed, or is not a mapping.
pub fn load_parameters(path: &Path) -> Result<Map<String, Value>, SchemaValidationError> {
    let content = read(path)?;

    let value = if is_yaml(path) {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| load_error(path, format!("invalid YAML: {e}")))?;
        yaml_to_json_value(&yaml_value)
            .map_err(|e| load_error(path, format!("YAML-to-JSON conversion failed: {e}")))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| load_error(path, format!("invalid JSON: {e}")))?
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(load_error(
            path,
            format!("parameters must be a mapping, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar map keys are stringified; sequence or mapping keys are rejected.
/// Tags are dropped and the inner value converted.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
