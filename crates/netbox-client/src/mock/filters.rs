//! Query parameter matching for mock list calls
//!
//! Supports the filters the provider sends: exact field matches
//! (`slug=`, `name=`, `cid=`), nested id matches (`site_id=`) and choice
//! values (`status=`).

use serde_json::Value;

/// True when `object` satisfies every filter
pub(crate) fn matches(object: &Value, filters: &[(&str, &str)]) -> bool {
    filters.iter().all(|(key, expected)| field_matches(object, key, expected))
}

fn field_matches(object: &Value, key: &str, expected: &str) -> bool {
    if let Some(value) = object.get(key) {
        return value_matches(value, expected);
    }
    if let Some(base) = key.strip_suffix("_id") {
        return object
            .get(base)
            .and_then(|nested| nested.get("id"))
            .is_some_and(|id| value_matches(id, expected));
    }
    false
}

fn value_matches(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Bool(b) => b.to_string() == expected,
        Value::Object(nested) => nested
            .get("value")
            .or_else(|| nested.get("id"))
            .is_some_and(|inner| value_matches(inner, expected)),
        _ => false,
    }
}
