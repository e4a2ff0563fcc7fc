//! # Broker Variables
//!
//! A [`BrokerVariable`] describes one configurable parameter of a service
//! plan: the key it serializes to, its JSON Schema type, a human-readable
//! description, and optionally a default, an enumeration of allowed values
//! and raw JSON Schema validation keywords.
//!
//! Descriptors are usually authored in YAML:
//!
//! ```yaml
//! - field_name: tier
//!   type: string
//!   details: Service tier.
//!   default: standard
//!   enum:
//!     standard: Standard
//!     premium: Premium
//! - field_name: size_gb
//!   type: integer
//!   required: true
//!   details: Disk size in GB.
//!   constraints:
//!     minimum: 10
//! ```
//!
//! ## Enumeration Keys
//!
//! Allowed values keep their YAML scalar type (bool, integer, float or
//! string) through [`EnumValue`]. JSON documents can only carry string
//! keys, so a JSON-authored enumeration is always string-valued.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{DescriptorErrors, FieldError};

/// The JSON Schema type of a variable.
///
/// Only the four primitives are recognized. Anything else is kept verbatim
/// in [`JsonType::Other`] so that descriptor validation can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JsonType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// Any other (possibly empty) type name.
    Other(String),
}

impl JsonType {
    /// The schema keyword value for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Other(s) => s,
        }
    }

    /// True for the four JSON Schema primitives.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// True when no type was given at all.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for JsonType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for JsonType {
    fn from(s: &str) -> Self {
        match s {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for JsonType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<JsonType> for String {
    fn from(t: JsonType) -> Self {
        match t {
            JsonType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One allowed value of an enumerated variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// A boolean value.
    Bool(bool),
    /// An integral value.
    Integer(i64),
    /// A positive integer above `i64::MAX`.
    Unsigned(u64),
    /// A non-integral (or out of integer range) number.
    Float(f64),
    /// A string value.
    String(String),
}

impl EnumValue {
    /// The value as it appears in a schema `enum` list.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Unsigned(u) => Value::from(*u),
            Self::Float(f) => Value::from(*f),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

/// The plain textual form, used as the sort key for schema output.
impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Unsigned(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EnumValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for EnumValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u64> for EnumValue {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::Unsigned(u), Self::Integer)
    }
}

impl From<f64> for EnumValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for EnumValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Allowed values of a variable, each with a friendly name.
///
/// Behaves like a map keyed by [`EnumValue`]: inserting an existing value
/// replaces its label. Iteration follows insertion order; use
/// [`Enumeration::sorted_values`] for the deterministic schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enumeration {
    entries: Vec<(EnumValue, String)>,
}

impl Enumeration {
    /// An empty enumeration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed value, replacing the label if it is already present.
    pub fn insert(&mut self, value: impl Into<EnumValue>, label: impl Into<String>) {
        let value = value.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((value, label)),
        }
    }

    /// Returns the number of allowed values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no allowed values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Friendly name of an allowed value.
    pub fn label(&self, value: &EnumValue) -> Option<&str> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, label)| label.as_str())
    }

    /// Iterate over `(value, label)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EnumValue, &str)> {
        self.entries.iter().map(|(v, l)| (v, l.as_str()))
    }

    /// Allowed values sorted ascending by their textual form.
    ///
    /// The sort is stable, so values with the same text (`1` and `"1"`)
    /// keep their insertion order.
    pub fn sorted_values(&self) -> Vec<&EnumValue> {
        let mut keyed: Vec<(String, &EnumValue)> = self
            .entries
            .iter()
            .map(|(v, _)| (v.to_string(), v))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, v)| v).collect()
    }
}

impl<V: Into<EnumValue>, L: Into<String>> FromIterator<(V, L)> for Enumeration {
    fn from_iter<I: IntoIterator<Item = (V, L)>>(iter: I) -> Self {
        let mut enumeration = Self::new();
        for (value, label) in iter {
            enumeration.insert(value, label);
        }
        enumeration
    }
}

impl Serialize for Enumeration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, label) in &self.entries {
            map.serialize_entry(value, label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Enumeration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnumerationVisitor;

        impl<'de> Visitor<'de> for EnumerationVisitor {
            type Value = Enumeration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from allowed value to friendly name")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Enumeration, E> {
                Ok(Enumeration::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Enumeration, A::Error> {
                let mut enumeration = Enumeration::new();
                while let Some((value, label)) = access.next_entry::<EnumValue, String>()? {
                    enumeration.insert(value, label);
                }
                Ok(enumeration)
            }
        }

        deserializer.deserialize_any(EnumerationVisitor)
    }
}

/// Description of one configurable parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrokerVariable {
    /// Whether the parameter must be present.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Key the parameter serializes to.
    #[serde(default)]
    pub field_name: String,

    /// JSON Schema type of the parameter.
    #[serde(rename = "type", default)]
    pub json_type: JsonType,

    /// Human-readable description.
    #[serde(default)]
    pub details: String,

    /// Value filled in when the parameter is absent. Should match
    /// `json_type`; this is not checked here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed values with friendly names. Empty means unrestricted.
    #[serde(rename = "enum", default, skip_serializing_if = "Enumeration::is_empty")]
    pub enumeration: Enumeration,

    /// Raw JSON Schema validation keywords (`minimum`, `pattern`, ...)
    /// merged into the generated schema.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl BrokerVariable {
    /// An optional variable with the given name, type and description.
    pub fn new(
        field_name: impl Into<String>,
        json_type: impl Into<JsonType>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            json_type: json_type.into(),
            details: details.into(),
            ..Self::default()
        }
    }

    /// Mark the variable as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value. A JSON `null` clears it.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = match default.into() {
            Value::Null => None,
            value => Some(value),
        };
        self
    }

    /// The default value, if one is set and not `null`.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| !v.is_null())
    }

    /// Add an allowed value.
    pub fn with_enum(mut self, value: impl Into<EnumValue>, label: impl Into<String>) -> Self {
        self.enumeration.insert(value, label);
        self
    }

    /// Add a JSON Schema validation keyword.
    pub fn with_constraint(mut self, keyword: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.insert(keyword.into(), value.into());
        self
    }

    /// Check the descriptor is well-formed.
    ///
    /// Reports every problem at once: a blank `field_name`, a `type` that
    /// is not a JSON Schema primitive, and a blank `details`.
    pub fn validate(&self) -> Result<(), DescriptorErrors> {
        let mut errs = DescriptorErrors::default();

        if self.field_name.trim().is_empty() {
            errs.push(FieldError::BlankField {
                field: "field_name".to_string(),
            });
        }

        if !self.json_type.is_recognized() {
            errs.push(FieldError::InvalidSchemaType {
                field: "type".to_string(),
                value: self.json_type.to_string(),
            });
        }

        if self.details.trim().is_empty() {
            errs.push(FieldError::BlankField {
                field: "details".to_string(),
            });
        }

        errs.into_result()
    }
}

/// Check a whole catalog of descriptors.
///
/// Paths are reported as `variables[<index>].<field>`.
pub fn validate_variables(variables: &[BrokerVariable]) -> Result<(), DescriptorErrors> {
    let mut errs = DescriptorErrors::default();
    for (index, variable) in variables.iter().enumerate() {
        if let Err(e) = variable.validate() {
            errs.extend(e.via_field_index("variables", index));
        }
    }
    errs.into_result()
}
