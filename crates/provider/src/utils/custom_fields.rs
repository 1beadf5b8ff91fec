//! Custom fields
//!
//! Configuration holds custom fields as `{name, type, value}` triples whose
//! value is always a string. NetBox holds typed JSON. Only the fields the
//! configuration lists are managed; fields set outside it are left alone.

use crate::framework::Attr;
use crate::validators;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// One custom field as it appears in configuration and state
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomFieldModel {
    /// Field name
    pub name: String,
    /// Field type (`text`, `integer`, ...)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Value rendered as a string; empty clears the field
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CustomFieldModel {
    /// Build a model
    pub fn new(name: &str, field_type: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convert a string value to the JSON NetBox expects for `field_type`
pub fn typed_value(field_type: &str, value: &str) -> Value {
    if value.is_empty() {
        return Value::Null;
    }
    match field_type {
        "integer" => value
            .parse::<i64>()
            .map_or_else(|_| Value::String(value.to_string()), Value::from),
        "decimal" => value
            .parse::<f64>()
            .map_or_else(|_| Value::String(value.to_string()), Value::from),
        "boolean" => match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => Value::String(other.to_string()),
        },
        "json" => serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string())),
        "multiselect" | "multiple" => Value::Array(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        _ => Value::String(value.to_string()),
    }
}

/// Render an API value as the configuration's string form
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        // Object references come back as brief objects; keep the id
        Value::Object(object) if object.contains_key("id") && object.contains_key("url") => {
            object.get("id").map(ToString::to_string).unwrap_or_default()
        }
        other => other.to_string(),
    }
}

/// Typed map for a request body
pub fn custom_fields_to_map(models: &[CustomFieldModel]) -> Map<String, Value> {
    models
        .iter()
        .map(|model| (model.name.clone(), typed_value(&model.field_type, &model.value)))
        .collect()
}

/// State for the managed fields: only names already in `current` are kept.
///
/// A value that is equal to the API value once typed keeps the user's
/// spelling (e.g. JSON whitespace, multiselect order of spaces).
pub fn map_to_custom_field_models(
    api: Option<&Map<String, Value>>,
    current: &Attr<Vec<CustomFieldModel>>,
) -> Attr<Vec<CustomFieldModel>> {
    let Some(current) = current.value() else {
        return Attr::Null;
    };
    let mut models: Vec<CustomFieldModel> = current
        .iter()
        .map(|model| {
            let api_value = api.and_then(|fields| fields.get(&model.name)).unwrap_or(&Value::Null);
            let value = if typed_value(&model.field_type, &model.value) == *api_value {
                model.value.clone()
            } else {
                value_to_string(api_value)
            };
            CustomFieldModel {
                value,
                ..model.clone()
            }
        })
        .collect();
    models.sort();
    Attr::Value(models)
}

/// Infer a custom field type from an API value
pub fn infer_type(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => "integer",
            _ => "decimal",
        },
        Value::String(s) => {
            if validators::is_match(&validators::DATE, s) {
                "date"
            } else if s.starts_with("http://") || s.starts_with("https://") {
                "url"
            } else if s.len() > 100 || s.contains('\n') {
                "longtext"
            } else {
                "text"
            }
        }
        Value::Array(_) | Value::Object(_) | Value::Null => "json",
    }
}

/// Models for every non-null API field, optionally restricted to `names`.
/// Used on import, where there is no prior state to take types from.
pub fn build_custom_field_models(
    api: Option<&Map<String, Value>>,
    names: Option<&[String]>,
) -> Vec<CustomFieldModel> {
    let Some(api) = api else {
        return Vec::new();
    };
    let mut models: Vec<CustomFieldModel> = api
        .iter()
        .filter(|(_, value)| !value.is_null())
        .filter(|(name, _)| names.is_none_or(|names| names.iter().any(|n| n == *name)))
        .map(|(name, value)| {
            let field_type = infer_type(value);
            let value = match (field_type, value) {
                ("json", _) => value.to_string(),
                _ => value_to_string(value),
            };
            CustomFieldModel::new(name, field_type, &value)
        })
        .collect();
    models.sort();
    models
}

/// Custom fields to send on create or update.
///
/// - plan null or unknown: resend the prior state's fields (or nothing)
/// - plan is an empty set: send nothing
/// - otherwise: prior state's fields overlaid with the plan; empty plan
///   values become `null`, which clears the field in NetBox
pub fn merge_custom_fields(
    plan: &Attr<Vec<CustomFieldModel>>,
    state: Option<&Attr<Vec<CustomFieldModel>>>,
) -> Map<String, Value> {
    let prior = state
        .and_then(Attr::value)
        .map(|models| custom_fields_to_map(models))
        .unwrap_or_default();

    match plan.value() {
        None => prior,
        Some(planned) if planned.is_empty() => Map::new(),
        Some(planned) => {
            let mut merged = prior;
            for (name, value) in custom_fields_to_map(planned) {
                debug!("Custom field {} -> {}", name, value);
                merged.insert(name, value);
            }
            merged
        }
    }
}

/// Names of the managed custom fields, for the import identity
pub fn custom_field_names(models: &Attr<Vec<CustomFieldModel>>) -> Vec<String> {
    let mut names: Vec<String> = models
        .value()
        .map(|models| models.iter().map(|m| m.name.clone()).collect())
        .unwrap_or_default();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn typed_conversion() {
        assert_eq!(typed_value("integer", "42"), json!(42));
        assert_eq!(typed_value("boolean", "true"), json!(true));
        assert_eq!(typed_value("json", r#"{"a": 1}"#), json!({"a": 1}));
        assert_eq!(typed_value("multiselect", "a, b,,c"), json!(["a", "b", "c"]));
        assert_eq!(typed_value("text", " x "), json!(" x "));
        assert_eq!(typed_value("integer", ""), Value::Null);
    }

    #[test]
    fn state_keeps_only_managed_fields() {
        let current = Attr::Value(vec![CustomFieldModel::new("owner", "text", "old")]);
        let fields = api(json!({"owner": "netops", "cost_center": "42"}));
        let state = map_to_custom_field_models(Some(&fields), &current);
        assert_eq!(state, Attr::Value(vec![CustomFieldModel::new("owner", "text", "netops")]));
        assert_eq!(map_to_custom_field_models(Some(&fields), &Attr::Null), Attr::Null);
    }

    #[test]
    fn state_keeps_user_spelling_of_equal_values() {
        let current = Attr::Value(vec![
            CustomFieldModel::new("meta", "json", r#"{ "a": 1 }"#),
            CustomFieldModel::new("zones", "multiselect", "a, b"),
        ]);
        let fields = api(json!({"meta": {"a": 1}, "zones": ["a", "b"]}));
        let state = map_to_custom_field_models(Some(&fields), &current);
        assert_eq!(state, current);
    }

    #[test]
    fn missing_api_value_becomes_empty() {
        let current = Attr::Value(vec![CustomFieldModel::new("owner", "text", "x")]);
        let state = map_to_custom_field_models(Some(&Map::new()), &current);
        assert_eq!(state, Attr::Value(vec![CustomFieldModel::new("owner", "text", "")]));
    }

    #[test]
    fn type_inference() {
        assert_eq!(infer_type(&json!(true)), "boolean");
        assert_eq!(infer_type(&json!(3)), "integer");
        assert_eq!(infer_type(&json!(3.0)), "integer");
        assert_eq!(infer_type(&json!(3.5)), "decimal");
        assert_eq!(infer_type(&json!("2024-05-01")), "date");
        assert_eq!(infer_type(&json!("https://wiki")), "url");
        assert_eq!(infer_type(&json!("a\nb")), "longtext");
        assert_eq!(infer_type(&json!("x".repeat(101))), "longtext");
        assert_eq!(infer_type(&json!("short")), "text");
        assert_eq!(infer_type(&json!({"k": 1})), "json");
        assert_eq!(infer_type(&json!([1, 2])), "json");
    }

    #[test]
    fn import_builds_filtered_models() {
        let fields = api(json!({"owner": "netops", "rack_units": 4, "unused": null}));
        let all = build_custom_field_models(Some(&fields), None);
        assert_eq!(
            all,
            vec![
                CustomFieldModel::new("owner", "text", "netops"),
                CustomFieldModel::new("rack_units", "integer", "4"),
            ]
        );
        let owned = build_custom_field_models(Some(&fields), Some(&["owner".to_string()]));
        assert_eq!(owned, vec![CustomFieldModel::new("owner", "text", "netops")]);
    }

    #[test]
    fn merge_rules() {
        let state = Attr::Value(vec![
            CustomFieldModel::new("owner", "text", "netops"),
            CustomFieldModel::new("rack_units", "integer", "4"),
        ]);

        // plan null: keep what state had
        let merged = merge_custom_fields(&Attr::Null, Some(&state));
        assert_eq!(merged, api(json!({"owner": "netops", "rack_units": 4})));

        // both null
        assert!(merge_custom_fields(&Attr::Null, None).is_empty());

        // explicit empty set
        assert!(merge_custom_fields(&Attr::Value(vec![]), Some(&state)).is_empty());

        // overlay, with an empty value clearing
        let plan = Attr::Value(vec![
            CustomFieldModel::new("owner", "text", "dcops"),
            CustomFieldModel::new("rack_units", "integer", ""),
        ]);
        let merged = merge_custom_fields(&plan, Some(&state));
        assert_eq!(merged, api(json!({"owner": "dcops", "rack_units": null})));
    }

    #[test]
    fn null_value_deserializes_as_empty() {
        let model: CustomFieldModel =
            serde_json::from_value(json!({"name": "owner", "type": "text", "value": null})).unwrap();
        assert_eq!(model.value, "");
    }
}
