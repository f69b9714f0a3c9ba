//! Convert serde_json::Value into the text form bound to `$n::type` placeholders.

use serde_json::Value;

/// Text representation of a scalar for a casted placeholder. `None` binds SQL NULL.
/// Nested values are bound as their JSON text.
pub fn bind_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(v.to_string()),
    }
}
