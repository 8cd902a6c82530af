//! Records - the data objects pushed into a component tree
//!
//! A record is any `serde_json::Value`; binding only looks inside objects. A
//! key that is absent or holds `null` counts as undefined and is skipped.

use serde_json::Value;

pub type Record = Value;

/// Value bound to `field`, or `None` when it is undefined
pub fn lookup<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    match record.get(field) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

/// Short name of a value's type, for error messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text form of a value when it has to be written as an attribute
pub(crate) fn to_attribute_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whether a value switches a boolean attribute on
///
/// `null`, `false`, zero and the empty string are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
