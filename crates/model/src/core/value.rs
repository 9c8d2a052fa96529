use crate::core::data_type::DataType;
use serde::Serialize;
use std::fmt;

/// Scalar cell value carried from the transformer to a sink.
///
/// `Json` only exists transiently: sinks receive values after
/// [`Value::into_scalar`] has flattened composites into display strings.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    String(String),
    Json(serde_json::Value),
    Null,
}

impl Value {
    pub fn from_opt_string(value: Option<String>) -> Self {
        value.map(Value::String).unwrap_or(Value::Null)
    }

    pub fn from_opt_int(value: Option<i64>) -> Self {
        value.map(Value::Int).unwrap_or(Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Collapses JSON into a scalar.
    ///
    /// Objects become their JSON text, arrays become their elements'
    /// display strings joined with `", "`. Integers stay integers; other
    /// numbers and booleans become their text form.
    pub fn into_scalar(self) -> Value {
        match self {
            Value::Json(json) => match json {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(b) => Value::String(b.to_string()),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => Value::Int(i),
                    None => Value::String(n.to_string()),
                },
                serde_json::Value::String(s) => Value::String(s),
                serde_json::Value::Array(items) => Value::String(
                    items
                        .iter()
                        .map(display_json)
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                obj @ serde_json::Value::Object(_) => Value::String(obj.to_string()),
            },
            other => other,
        }
    }

    /// Fits the value to a column of `data_type`.
    ///
    /// Integers headed for text columns are rendered as text. Text headed
    /// for an integer column is parsed, and becomes `Null` if it is not a
    /// whole number.
    pub fn coerce(self, data_type: DataType) -> Value {
        match (self.into_scalar(), data_type) {
            (Value::Int(v), DataType::Text) => Value::String(v.to_string()),
            (Value::String(s), DataType::BigInt) => {
                s.trim().parse().map(Value::Int).unwrap_or(Value::Null)
            }
            (other, _) => other,
        }
    }
}

/// Display form of a JSON element inside a flattened list: strings are
/// rendered bare, everything else as JSON text.
fn display_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Json(v) => write!(f, "{v}"),
            Value::Null => f.write_str("NULL"),
        }
    }
}
