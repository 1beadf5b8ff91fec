//! Attribute factories shared by resource schemas

use crate::framework::{Attribute, AttributeKind, Schema};
use crate::validators;
use serde_json::json;

/// Computed `id`, stable across plans
pub fn id_attribute(resource: &str) -> Attribute {
    Attribute::computed(
        AttributeKind::String,
        format!("Unique identifier for the {} (assigned by Netbox).", resource),
    )
    .use_state_for_unknown()
}

/// Required `name` of 1 to `max` characters
pub fn name_attribute(resource: &str, max: usize) -> Attribute {
    Attribute::required(AttributeKind::String, format!("Name of the {}.", resource))
        .validator(validators::length_between(1, max))
}

/// Optional `name` of at most `max` characters
pub fn optional_name_attribute(resource: &str, max: usize) -> Attribute {
    Attribute::optional(AttributeKind::String, format!("Name of the {}.", resource))
        .validator(validators::length_between(0, max))
}

/// Required `model` for device types
pub fn model_attribute(resource: &str, max: usize) -> Attribute {
    Attribute::required(AttributeKind::String, format!("Model name/number of the {}.", resource))
        .validator(validators::length_between(1, max))
}

/// Required `slug`
pub fn slug_attribute(resource: &str) -> Attribute {
    Attribute::required(
        AttributeKind::String,
        format!(
            "URL-friendly identifier for the {}. Must be unique and contain only lowercase \
             letters, numbers, hyphens, and underscores.",
            resource
        ),
    )
    .validator(validators::length_between(1, 100))
    .validator(validators::slug())
}

/// Optional `description`, at most 200 characters
pub fn description_attribute(resource: &str) -> Attribute {
    Attribute::optional(AttributeKind::String, format!("Description of the {}.", resource))
        .validator(validators::length_between(0, 200))
}

/// Optional free-form `comments`
pub fn comments_attribute(resource: &str) -> Attribute {
    Attribute::optional(
        AttributeKind::String,
        format!(
            "Additional comments or notes about the {}. Supports Markdown formatting.",
            resource
        ),
    )
}

fn reference_description(target: &str, description: &str, fallback: String) -> String {
    if description.is_empty() {
        fallback
    } else {
        description.to_string()
    }
    .replace("{target}", target)
}

/// Optional reference given as id, slug or name
pub fn reference_attribute(target: &str, description: &str) -> Attribute {
    Attribute::optional(
        AttributeKind::String,
        reference_description(target, description, format!("ID or slug of the {}.", target)),
    )
}

/// Read-only id of a related object, reported next to its reference
pub fn computed_reference_id_attribute(target: &str) -> Attribute {
    Attribute::computed(
        AttributeKind::String,
        format!("ID of the {}, as reported by Netbox.", target),
    )
}

/// Required reference given as id, slug or name
pub fn required_reference_attribute(target: &str, description: &str) -> Attribute {
    Attribute::required(
        AttributeKind::String,
        reference_description(target, description, format!("ID or slug of the {}. Required.", target)),
    )
}

/// Optional reference that only accepts numeric ids
pub fn id_only_reference_attribute(target: &str, description: &str) -> Attribute {
    Attribute::optional(
        AttributeKind::String,
        reference_description(target, description, format!("ID of the {}.", target)),
    )
    .validator(validators::integer_id())
}

/// Status choice defaulting to `default`
pub fn status_attribute(values: &'static [&'static str], default: &str, description: &str) -> Attribute {
    Attribute::optional(AttributeKind::String, description)
        .validator(validators::one_of(values))
        .default_value(json!(default))
}

/// Optional choice; `""` clears it
pub fn enum_attribute(description: &str, values: &'static [&'static str]) -> Attribute {
    Attribute::optional(AttributeKind::String, description).validator(validators::one_of_or_empty(values))
}

/// Required choice
pub fn required_enum_attribute(description: &str, values: &'static [&'static str]) -> Attribute {
    Attribute::required(AttributeKind::String, description).validator(validators::one_of(values))
}

/// Optional hex color
pub fn color_attribute(resource: &str) -> Attribute {
    Attribute::optional(
        AttributeKind::String,
        format!(
            "Color for the {} in 6-character hexadecimal format (without #). Example: 'aa1409'.",
            resource
        ),
    )
    .validator(validators::hex_color())
}

/// Hex color NetBox assigns when unset
pub fn computed_color_attribute(resource: &str) -> Attribute {
    Attribute::optional_computed(
        AttributeKind::String,
        format!(
            "Color for the {} in 6-character hexadecimal format (without #). Example: 'aa1409'. \
             If not specified, Netbox assigns a default.",
            resource
        ),
    )
    .validator(validators::hex_color())
    .use_state_for_unknown()
}

/// Optional bool with a default
pub fn bool_attribute_with_default(description: &str, default: bool) -> Attribute {
    Attribute::optional(AttributeKind::Bool, description).default_value(json!(default))
}

/// Optional string of at most `max` characters
pub fn bounded_string_attribute(description: &str, max: usize) -> Attribute {
    Attribute::optional(AttributeKind::String, description).validator(validators::length_between(0, max))
}

/// Set of tag slugs
pub fn tags_attribute() -> Attribute {
    Attribute::optional(
        AttributeKind::string_set(),
        "Slugs of the tags assigned to this resource. Tags must already exist in Netbox.",
    )
}

/// Object type of one custom field element
pub fn custom_field_kind() -> AttributeKind {
    AttributeKind::Object(vec![
        ("name".to_string(), AttributeKind::String),
        ("type".to_string(), AttributeKind::String),
        ("value".to_string(), AttributeKind::String),
    ])
}

/// Set of `{name, type, value}` custom fields
pub fn custom_fields_attribute() -> Attribute {
    Attribute::optional(
        AttributeKind::Set(Box::new(custom_field_kind())),
        "Custom fields managed by this configuration. Fields set outside of it are left untouched; \
         an empty value clears a field.",
    )
    .validator(validators::CustomFields)
}

/// Identity accepted by import blocks: the object id plus the custom
/// fields the configuration owns
pub fn import_identity_with_custom_fields_schema() -> Schema {
    Schema::new("Import identity")
        .attribute(
            "id",
            Attribute::required(AttributeKind::String, "Netbox object ID."),
        )
        .attribute(
            "custom_fields",
            Attribute::optional(
                AttributeKind::List(Box::new(AttributeKind::String)),
                "Names of the custom fields to import into state.",
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_has_default_and_choices() {
        let status = status_attribute(&["active", "planned"], "active", "Status");
        assert!(status.optional && status.computed);
        assert_eq!(status.default, Some(json!("active")));
        assert_eq!(status.validators.len(), 1);
    }

    #[test]
    fn id_is_read_only() {
        let id = id_attribute("site");
        assert!(id.is_read_only());
        assert!(id.use_state_for_unknown);
        assert_eq!(id.description, "Unique identifier for the site (assigned by Netbox).");
    }

    #[test]
    fn reference_descriptions() {
        assert_eq!(reference_attribute("tenant", "").description, "ID or slug of the tenant.");
        assert!(required_reference_attribute("site", "").required);
        assert_eq!(
            id_only_reference_attribute("interface", "Parent {target}.").description,
            "Parent interface."
        );
    }

    #[test]
    fn custom_fields_element_shape() {
        let attr = custom_fields_attribute();
        assert!(attr
            .kind
            .accepts(&json!([{"name": "owner", "type": "text", "value": "netops"}])));
        assert!(!attr.kind.accepts(&json!([{"name": "owner", "color": "red"}])));
    }

    #[test]
    fn identity_schema_requires_id() {
        let schema = import_identity_with_custom_fields_schema();
        assert!(schema.get("id").unwrap().required);
        assert!(schema.validate(&json!({"custom_fields": ["owner"]})).has_error());
        assert!(!schema.validate(&json!({"id": "4", "custom_fields": ["owner"]})).has_error());
    }
}
