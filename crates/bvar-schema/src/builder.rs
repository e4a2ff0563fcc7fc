//! # Schema Builder
//!
//! Converts broker variables into JSON Schema draft-04.
//!
//! ## Keyword Precedence
//!
//! A variable's fragment is assembled in a fixed order, each step
//! overwriting any earlier key of the same name:
//!
//! `title` ← constraints ← `enum` ← `description` ← `type` ← `default`
//!
//! So a constraint can replace the generated `title`, but a constraint
//! named `type`, `enum`, `description` or `default` is overwritten by the
//! value derived from the variable itself whenever that value is present.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use bvar_core::{field_name_to_label, BrokerVariable};

/// `$schema` identifier of every generated document.
pub const DRAFT_04_SCHEMA: &str = "http://json-schema.org/draft-04/schema#";

/// Schema keyword: JSON Schema version identifier.
pub const KEY_SCHEMA: &str = "$schema";
/// Schema keyword: human-readable title.
pub const KEY_TITLE: &str = "title";
/// Schema keyword: long description.
pub const KEY_DESCRIPTION: &str = "description";
/// Schema keyword: value type.
pub const KEY_TYPE: &str = "type";
/// Schema keyword: default value.
pub const KEY_DEFAULT: &str = "default";
/// Schema keyword: allowed values.
pub const KEY_ENUM: &str = "enum";
/// Schema keyword: object property schemas.
pub const KEY_PROPERTIES: &str = "properties";
/// Schema keyword: required property names.
pub const KEY_REQUIRED: &str = "required";

/// Build the schema fragment for one variable.
pub fn variable_schema(variable: &BrokerVariable) -> Map<String, Value> {
    let mut schema = Map::new();

    // Title goes first so a constraint can override it.
    if !variable.field_name.is_empty() {
        schema.insert(
            KEY_TITLE.to_string(),
            Value::String(field_name_to_label(&variable.field_name)),
        );
    }

    for (keyword, value) in &variable.constraints {
        schema.insert(keyword.clone(), value.clone());
    }

    if !variable.enumeration.is_empty() {
        let values = variable
            .enumeration
            .sorted_values()
            .into_iter()
            .map(|v| v.to_json())
            .collect();
        schema.insert(KEY_ENUM.to_string(), Value::Array(values));
    }

    if !variable.details.is_empty() {
        schema.insert(
            KEY_DESCRIPTION.to_string(),
            Value::String(variable.details.clone()),
        );
    }

    if !variable.json_type.is_empty() {
        if !variable.json_type.is_recognized() {
            tracing::warn!(
                field = %variable.field_name,
                json_type = %variable.json_type,
                "emitting unrecognized JSON Schema type"
            );
        }
        schema.insert(
            KEY_TYPE.to_string(),
            Value::String(variable.json_type.to_string()),
        );
    }

    if let Some(default) = variable.default_value() {
        schema.insert(KEY_DEFAULT.to_string(), default.clone());
    }

    schema
}

/// Build the object schema describing a whole parameter payload.
///
/// Every variable becomes a property. Required variables are listed under
/// `required` in ascending name order, without duplicates; the key is
/// omitted when nothing is required. Extra payload keys are allowed.
pub fn create_json_schema(variables: &[BrokerVariable]) -> Value {
    let mut required = BTreeSet::new();
    let mut properties = Map::new();

    for variable in variables {
        properties.insert(
            variable.field_name.clone(),
            Value::Object(variable_schema(variable)),
        );
        if variable.required {
            required.insert(variable.field_name.clone());
        }
    }

    tracing::debug!(
        properties = properties.len(),
        required = required.len(),
        "built parameter schema"
    );

    let mut schema = Map::new();
    schema.insert(
        KEY_SCHEMA.to_string(),
        Value::String(DRAFT_04_SCHEMA.to_string()),
    );
    schema.insert(KEY_TYPE.to_string(), Value::String("object".to_string()));
    schema.insert(KEY_PROPERTIES.to_string(), Value::Object(properties));

    if !required.is_empty() {
        schema.insert(
            KEY_REQUIRED.to_string(),
            Value::Array(required.into_iter().map(Value::String).collect()),
        );
    }

    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bvar_core::JsonType;
    use serde_json::json;

    #[test]
    fn fragment_for_simple_variable() {
        let v = BrokerVariable::new("instance_id", JsonType::String, "The instance.");
        assert_eq!(
            Value::Object(variable_schema(&v)),
            json!({
                "title": "Instance ID",
                "description": "The instance.",
                "type": "string"
            })
        );
    }

    #[test]
    fn fragment_includes_default_and_constraints() {
        let v = BrokerVariable::new("size_gb", JsonType::Integer, "Disk size.")
            .with_default(10)
            .with_constraint("minimum", 1)
            .with_constraint("maximum", 64);
        let schema = variable_schema(&v);
        assert_eq!(schema["default"], json!(10));
        assert_eq!(schema["minimum"], json!(1));
        assert_eq!(schema["maximum"], json!(64));
        assert_eq!(schema["title"], json!("Size GB"));
    }

    #[test]
    fn constraint_overrides_title() {
        let v = BrokerVariable::new("tier", JsonType::String, "Tier.")
            .with_constraint("title", "Service Tier");
        assert_eq!(variable_schema(&v)["title"], json!("Service Tier"));
    }

    #[test]
    fn generated_keywords_override_constraints() {
        let v = BrokerVariable::new("tier", JsonType::String, "Tier.")
            .with_default("basic")
            .with_constraint("type", "integer")
            .with_constraint("description", "ignored")
            .with_constraint("default", "ignored")
            .with_constraint("enum", json!(["ignored"]))
            .with_enum("basic", "Basic");
        let schema = variable_schema(&v);
        assert_eq!(schema["type"], json!("string"));
        assert_eq!(schema["description"], json!("Tier."));
        assert_eq!(schema["default"], json!("basic"));
        assert_eq!(schema["enum"], json!(["basic"]));
    }

    #[test]
    fn constraint_survives_when_generated_value_absent() {
        let v = BrokerVariable {
            field_name: "mode".to_string(),
            details: "Mode.".to_string(),
            ..BrokerVariable::default()
        }
        .with_constraint("type", "string");
        assert_eq!(variable_schema(&v)["type"], json!("string"));
    }

    #[test]
    fn enum_sorted_by_text() {
        let v = BrokerVariable::new("zone", JsonType::String, "Zone.")
            .with_enum("us-west1", "Oregon")
            .with_enum("asia-east1", "Taiwan")
            .with_enum("europe-west1", "Belgium");
        assert_eq!(
            variable_schema(&v)["enum"],
            json!(["asia-east1", "europe-west1", "us-west1"])
        );
    }

    #[test]
    fn numeric_enum_sorted_by_text_not_value() {
        let v = BrokerVariable::new("replicas", JsonType::Integer, "Replicas.")
            .with_enum(10_i64, "Ten")
            .with_enum(2_i64, "Two")
            .with_enum(1_i64, "One");
        assert_eq!(variable_schema(&v)["enum"], json!([1, 10, 2]));
    }

    #[test]
    fn enum_keeps_values_above_i64() {
        let v = BrokerVariable::new("id", JsonType::Integer, "Id.")
            .with_enum(u64::MAX, "Max")
            .with_enum(1_i64, "One");
        assert_eq!(
            variable_schema(&v)["enum"],
            json!([1, 18446744073709551615_u64])
        );
    }

    #[test]
    fn null_default_is_not_emitted() {
        let v = BrokerVariable {
            default: Some(Value::Null),
            ..BrokerVariable::new("name", JsonType::String, "Name.")
        };
        assert!(!variable_schema(&v).contains_key("default"));
    }

    #[test]
    fn empty_enum_and_constraints_add_nothing() {
        let v = BrokerVariable::new("name", JsonType::String, "Name.");
        let schema = variable_schema(&v);
        assert!(!schema.contains_key("enum"));
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn blank_name_has_no_title() {
        let v = BrokerVariable::new("", JsonType::String, "Nameless.");
        assert!(!variable_schema(&v).contains_key("title"));
    }

    #[test]
    fn empty_catalog_gives_minimal_object_schema() {
        assert_eq!(
            create_json_schema(&[]),
            json!({
                "$schema": DRAFT_04_SCHEMA,
                "type": "object",
                "properties": {}
            })
        );
    }

    #[test]
    fn document_collects_required_names() {
        let vars = vec![
            BrokerVariable::new("zone", JsonType::String, "Zone.").required(),
            BrokerVariable::new("name", JsonType::String, "Name."),
            BrokerVariable::new("size", JsonType::Integer, "Size.").required(),
        ];
        let schema = create_json_schema(&vars);
        assert_eq!(schema["required"], json!(["size", "zone"]));
        assert_eq!(schema["properties"].as_object().unwrap().len(), 3);
        assert_eq!(schema["properties"]["zone"]["title"], json!("Zone"));
    }

    #[test]
    fn required_is_order_independent_and_unique() {
        let a = BrokerVariable::new("a", JsonType::String, "A.").required();
        let b = BrokerVariable::new("b", JsonType::String, "B.").required();
        let forward = create_json_schema(&[a.clone(), b.clone()]);
        let backward = create_json_schema(&[b.clone(), a.clone(), b]);
        assert_eq!(forward["required"], json!(["a", "b"]));
        assert_eq!(backward["required"], json!(["a", "b"]));
    }

    #[test]
    fn no_additional_properties_restriction() {
        let vars = vec![BrokerVariable::new("a", JsonType::String, "A.")];
        assert!(create_json_schema(&vars).get("additionalProperties").is_none());
    }
}
