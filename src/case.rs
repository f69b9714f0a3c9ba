//! Case conversion between wire field names (camelCase) and SQL column names (snake_case).

use serde_json::{Map, Value};

/// Convert a single identifier from snake_case to camelCase.
/// e.g. "item_id" -> "itemId", "date_reviewed" -> "dateReviewed"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "orgCode" -> "org_code", "tableOrBreakoutRoom" -> "table_or_breakout_room"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert all keys of a JSON object from snake_case to camelCase (in place).
/// Rows read from SQL are keyed by column name; records deserialize from wire names.
pub fn object_keys_to_camel_case(obj: &mut Map<String, Value>) {
    let keys: Vec<String> = obj.keys().cloned().collect();
    for k in keys {
        let camel = to_camel_case(&k);
        if camel != k {
            if let Some(v) = obj.remove(&k) {
                obj.insert(camel, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_and_camel_round_trip_field_names() {
        for name in ["diningCommonsCode", "orgTranslationShort", "tableOrBreakoutRoom", "id", "done"] {
            assert_eq!(to_camel_case(&to_snake_case(name)), name);
        }
        assert_eq!(to_snake_case("orgCode"), "org_code");
    }

    #[test]
    fn object_keys_are_renamed() {
        let mut obj = Map::new();
        obj.insert("item_id".into(), Value::from(29));
        obj.insert("stars".into(), Value::from(1));
        object_keys_to_camel_case(&mut obj);
        assert_eq!(obj.get("itemId"), Some(&Value::from(29)));
        assert_eq!(obj.get("stars"), Some(&Value::from(1)));
        assert!(!obj.contains_key("item_id"));
    }
}
