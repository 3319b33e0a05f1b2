//! Field specification types.
//!
//! A field spec arrives as a loosely-typed document (a JSON object or TOML
//! table). Once the spec validator has accepted it, it is compiled into a
//! [`FieldSpec`], which can only describe well-formed rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::callback::Callback;

/// The keys a field spec document may contain.
pub const FIELD_SPEC_KEYS: [&str; 4] = ["type", "optional", "default", "callbacks"];

/// The closed set of value kinds a field can be restricted to.
///
/// Names follow the short identifiers used in spec documents
/// (`type = "list"`) and in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Int,
    Float,
    Bool,
    Str,
    List,
    Dict,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Int,
        FieldType::Float,
        FieldType::Bool,
        FieldType::Str,
        FieldType::List,
        FieldType::Dict,
    ];

    /// Look up a type by its document identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The identifier used in documents and error messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Str => "str",
            FieldType::List => "list",
            FieldType::Dict => "dict",
        }
    }

    /// Return true if `value` is of this kind.
    ///
    /// Matching is strict: the value's own kind must equal this type, so
    /// booleans are not integers (`Int` rejects `true`) and integers are
    /// not floats (`Float` rejects `1`).
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::Int => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_f64(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Str => value.is_string(),
            FieldType::List => value.is_array(),
            FieldType::Dict => value.is_object(),
        }
    }

    /// `[int, float, bool, str, list, dict]`, as quoted in spec errors.
    pub fn allowed_names() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
        format!("[{}]", names.join(", "))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for the runtime kind of `value`.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// A compiled, well-formed specification for one named field.
#[derive(Clone, Default)]
pub struct FieldSpec {
    /// Required kind of the value. `None` accepts any kind.
    pub field_type: Option<FieldType>,
    /// Whether the field may be omitted from the parameters.
    pub optional: bool,
    /// Value inserted when an optional field is omitted.
    pub default: Option<Value>,
    /// Named callbacks, in the order they are run.
    pub callbacks: Vec<(String, Callback)>,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        !self.optional
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks: Vec<&str> = self.callbacks.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("FieldSpec")
            .field("field_type", &self.field_type)
            .field("optional", &self.optional)
            .field("default", &self.default)
            .field("callbacks", &callbacks)
            .finish()
    }
}
