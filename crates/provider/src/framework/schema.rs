//! Resource and provider schemas
//!
//! A [`Schema`] lists the attributes of a resource with their type, their
//! required/optional/computed flags, validators and defaults. The same
//! schema validates configuration, fills defaults into plans and shapes
//! the state that is handed back to the host.

use super::diag::Diagnostics;
use super::value::is_unknown_value;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Attribute value type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// UTF-8 string
    String,
    /// 64-bit integer
    Int64,
    /// 64-bit float
    Float64,
    /// Boolean
    Bool,
    /// Unordered set of elements
    Set(Box<AttributeKind>),
    /// Ordered list of elements
    List(Box<AttributeKind>),
    /// Object with fixed fields
    Object(Vec<(String, AttributeKind)>),
}

impl AttributeKind {
    /// Set of strings
    pub fn string_set() -> Self {
        AttributeKind::Set(Box::new(AttributeKind::String))
    }

    /// Human-readable type name used in diagnostics
    pub fn name(&self) -> String {
        match self {
            AttributeKind::String => "string".to_string(),
            AttributeKind::Int64 => "number".to_string(),
            AttributeKind::Float64 => "number".to_string(),
            AttributeKind::Bool => "bool".to_string(),
            AttributeKind::Set(element) => format!("set of {}", element.name()),
            AttributeKind::List(element) => format!("list of {}", element.name()),
            AttributeKind::Object(_) => "object".to_string(),
        }
    }

    /// Type description in the host's JSON type notation
    pub fn type_json(&self) -> Value {
        match self {
            AttributeKind::String => json!("string"),
            AttributeKind::Int64 | AttributeKind::Float64 => json!("number"),
            AttributeKind::Bool => json!("bool"),
            AttributeKind::Set(element) => json!(["set", element.type_json()]),
            AttributeKind::List(element) => json!(["list", element.type_json()]),
            AttributeKind::Object(fields) => {
                let fields: Map<String, Value> = fields
                    .iter()
                    .map(|(name, kind)| (name.clone(), kind.type_json()))
                    .collect();
                json!(["object", fields])
            }
        }
    }

    /// True when `value` has this type. Unknown and null are accepted anywhere.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() || is_unknown_value(value) {
            return true;
        }
        match self {
            AttributeKind::String => value.is_string(),
            AttributeKind::Int64 => value.is_i64() || value.is_u64(),
            AttributeKind::Float64 => value.is_number(),
            AttributeKind::Bool => value.is_boolean(),
            AttributeKind::Set(element) | AttributeKind::List(element) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.accepts(item))),
            AttributeKind::Object(fields) => value.as_object().is_some_and(|object| {
                object.keys().all(|key| fields.iter().any(|(name, _)| name == key))
                    && fields
                        .iter()
                        .all(|(name, kind)| object.get(name).is_none_or(|v| kind.accepts(v)))
            }),
        }
    }
}

/// Validates a known, non-null attribute value
pub trait Validator: Send + Sync + fmt::Debug {
    /// Short description shown in schema output
    fn description(&self) -> String;

    /// Add diagnostics for `value` at `attribute`
    fn validate(&self, attribute: &str, value: &Value, diags: &mut Diagnostics);
}

/// One schema attribute
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Value type
    pub kind: AttributeKind,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Set by the provider when not configured
    pub computed: bool,
    /// Hidden from output
    pub sensitive: bool,
    /// Documentation
    pub description: String,
    /// Value validators
    pub validators: Vec<Arc<dyn Validator>>,
    /// Value used when configuration leaves the attribute null
    pub default: Option<Value>,
    /// Carry the prior state value into the plan instead of unknown
    pub use_state_for_unknown: bool,
}

impl Attribute {
    fn new(kind: AttributeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            description: description.into(),
            validators: Vec::new(),
            default: None,
            use_state_for_unknown: false,
        }
    }

    /// Attribute the configuration must set
    pub fn required(kind: AttributeKind, description: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(kind, description)
        }
    }

    /// Attribute the configuration may set
    pub fn optional(kind: AttributeKind, description: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(kind, description)
        }
    }

    /// Read-only attribute set by the provider
    pub fn computed(kind: AttributeKind, description: impl Into<String>) -> Self {
        Self {
            computed: true,
            ..Self::new(kind, description)
        }
    }

    /// Optional attribute the provider fills in when unset
    pub fn optional_computed(kind: AttributeKind, description: impl Into<String>) -> Self {
        Self {
            optional: true,
            computed: true,
            ..Self::new(kind, description)
        }
    }

    /// Add a validator
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Default for an unset optional attribute; defaults imply computed
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self.computed = true;
        self
    }

    /// Mark sensitive
    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Keep the prior state value during planning
    #[must_use]
    pub fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    /// True for attributes only the provider sets
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    fn to_json(&self) -> Value {
        let mut out = json!({
            "type": self.kind.type_json(),
            "description": self.description,
            "required": self.required,
            "optional": self.optional,
            "computed": self.computed,
            "sensitive": self.sensitive,
        });
        if let Some(default) = &self.default {
            out["default"] = default.clone();
        }
        if !self.validators.is_empty() {
            out["validators"] = self
                .validators
                .iter()
                .map(|v| Value::String(v.description()))
                .collect();
        }
        out
    }
}

/// Attribute set of a resource, provider or import identity
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Documentation
    pub description: String,
    /// Attributes by name
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Empty schema
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// True when the attribute exists
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Validate a configuration object
    pub fn validate(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let Some(object) = config.as_object() else {
            diags.add_error(
                "Invalid Configuration",
                format!("Expected an object, got: {}", config),
            );
            return diags;
        };

        for key in object.keys().filter(|key| !self.contains(key)) {
            diags.add_attribute_error(
                key.as_str(),
                "Unsupported argument",
                format!("An argument named \"{}\" is not expected here.", key),
            );
        }

        for (name, attribute) in &self.attributes {
            let value = object.get(name).unwrap_or(&Value::Null);
            if value.is_null() {
                if attribute.required {
                    diags.add_attribute_error(
                        name.as_str(),
                        "Missing required argument",
                        format!("The argument \"{}\" is required, but no definition was found.", name),
                    );
                }
                continue;
            }
            if is_unknown_value(value) {
                continue;
            }
            if attribute.is_read_only() {
                diags.add_attribute_error(
                    name.as_str(),
                    "Invalid Configuration for Read-Only Attribute",
                    "Cannot set value for this attribute as the provider has marked it as \
                     read-only. Remove the configuration line setting the value.",
                );
                continue;
            }
            if !attribute.kind.accepts(value) {
                diags.add_attribute_error(
                    name.as_str(),
                    "Incorrect attribute value type",
                    format!(
                        "Inappropriate value for attribute \"{}\": {} required.",
                        name,
                        attribute.kind.name()
                    ),
                );
                continue;
            }
            for validator in &attribute.validators {
                validator.validate(name, value, &mut diags);
            }
        }
        diags
    }

    /// Fill defaults into a plan for attributes the configuration left null
    pub fn apply_defaults(&self, plan: &mut Value) {
        let Some(object) = plan.as_object_mut() else {
            return;
        };
        for (name, attribute) in &self.attributes {
            let Some(default) = &attribute.default else {
                continue;
            };
            let unset = object
                .get(name)
                .is_none_or(|v| v.is_null() || is_unknown_value(v));
            if unset {
                object.insert(name.clone(), default.clone());
            }
        }
    }

    /// Copy prior state values into the plan for `use_state_for_unknown` attributes
    pub fn carry_state(&self, plan: &mut Value, state: &Value) {
        let Some(object) = plan.as_object_mut() else {
            return;
        };
        for (name, _) in self.attributes.iter().filter(|(_, a)| a.use_state_for_unknown) {
            let unset = object
                .get(name)
                .is_none_or(|v| v.is_null() || is_unknown_value(v));
            if let (true, Some(prior)) = (unset, state.get(name)) {
                object.insert(name.clone(), prior.clone());
            }
        }
    }

    /// Shape a state object: exactly the schema's attributes, no unknowns
    pub fn conform(&self, state: Value) -> Value {
        let mut object = match state {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        let mut out = Map::new();
        for name in self.attributes.keys() {
            let value = match object.remove(name) {
                Some(v) if is_unknown_value(&v) => Value::Null,
                Some(v) => v,
                None => Value::Null,
            };
            out.insert(name.clone(), value);
        }
        Value::Object(out)
    }

    /// Schema in the host's JSON notation
    pub fn to_json(&self) -> Value {
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .map(|(name, attribute)| (name.clone(), attribute.to_json()))
            .collect();
        json!({
            "description": self.description,
            "attributes": attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::value::UNKNOWN;

    fn schema() -> Schema {
        Schema::new("test")
            .attribute("id", Attribute::computed(AttributeKind::String, "id").use_state_for_unknown())
            .attribute("name", Attribute::required(AttributeKind::String, "name"))
            .attribute(
                "status",
                Attribute::optional(AttributeKind::String, "status").default_value(json!("active")),
            )
            .attribute("tags", Attribute::optional(AttributeKind::string_set(), "tags"))
    }

    #[test]
    fn missing_required_and_unknown_keys_are_reported() {
        let diags = schema().validate(&json!({"bogus": 1}));
        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_str()).collect();
        assert!(summaries.contains(&"Unsupported argument"));
        assert!(summaries.contains(&"Missing required argument"));
    }

    #[test]
    fn read_only_attribute_cannot_be_configured() {
        let diags = schema().validate(&json!({"name": "x", "id": "3"}));
        assert!(diags.has_error());
        assert_eq!(diags.iter().next().unwrap().attribute.as_deref(), Some("id"));
    }

    #[test]
    fn type_mismatch_is_reported() {
        let diags = schema().validate(&json!({"name": 5}));
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Incorrect attribute value type"
        );
        assert!(!schema().validate(&json!({"name": UNKNOWN})).has_error());
    }

    #[test]
    fn defaults_fill_null_attributes() {
        let mut plan = json!({"name": "x", "status": null});
        schema().apply_defaults(&mut plan);
        assert_eq!(plan["status"], "active");

        let mut plan = json!({"name": "x", "status": "planned"});
        schema().apply_defaults(&mut plan);
        assert_eq!(plan["status"], "planned");
    }

    #[test]
    fn conform_drops_extra_keys_and_unknowns() {
        let state = schema().conform(json!({"name": "x", "id": UNKNOWN, "extra": true}));
        assert_eq!(
            state,
            json!({"id": null, "name": "x", "status": null, "tags": null})
        );
    }

    #[test]
    fn carry_state_keeps_prior_id() {
        let mut plan = json!({"name": "x", "id": UNKNOWN});
        schema().carry_state(&mut plan, &json!({"id": "12"}));
        assert_eq!(plan["id"], "12");
    }
}
