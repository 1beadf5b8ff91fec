//! Turning client errors into diagnostics

use crate::framework::Diagnostics;
use netbox_client::{Endpoint, NetBoxClientTrait, NetBoxError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Detail line for a failed API call, with the response body when NetBox sent one
pub fn format_api_error(operation: &str, err: &NetBoxError) -> String {
    match err {
        NetBoxError::BadRequest { path, body } => format!(
            "Could not {}, unexpected error: HTTP 400 from {}. Response body: {}",
            operation, path, body
        ),
        other => format!("Could not {}, unexpected error: {}", operation, other),
    }
}

fn is_duplicate_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("already exists")
        || lower.contains("must be unique")
        || (lower.contains("with this") && lower.contains("exists"))
}

/// Fields NetBox rejected as duplicates, from a 400 body such as
/// `{"slug": ["site with this slug already exists."]}`.
///
/// `None` when the body is not a field map or no message is about uniqueness.
pub fn parse_duplicate_fields(body: &str) -> Option<BTreeMap<String, Vec<String>>> {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    let mut errors = BTreeMap::new();
    for (field, messages) in fields {
        let messages: Vec<String> = match messages {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect(),
            Value::String(message) => vec![message],
            _ => continue,
        };
        errors.insert(field, messages);
    }
    let duplicate = errors
        .values()
        .flatten()
        .any(|message| is_duplicate_message(message));
    duplicate.then_some(errors)
}

/// Builds create diagnostics, with an import hint for duplicates
#[derive(Debug, Clone)]
pub struct CreateErrorHandler<'a> {
    /// Full resource type, e.g. `netbox_site`
    pub resource_type: String,
    /// Endpoint the create was sent to
    pub endpoint: &'a Endpoint,
    /// Unique field used to find the existing object (`slug`, `name`, ...)
    pub lookup_field: Option<&'static str>,
    /// Value of that field in the plan
    pub lookup_value: String,
    /// Extra filters for fields unique only within a parent, e.g. `device_id`
    pub scope: Vec<(&'static str, String)>,
}

impl CreateErrorHandler<'_> {
    /// Diagnostics for a failed create
    pub async fn handle(&self, client: &dyn NetBoxClientTrait, err: &NetBoxError) -> Diagnostics {
        let duplicates = err.response_body().and_then(parse_duplicate_fields);
        let Some(duplicates) = duplicates else {
            return Diagnostics::error(
                format!("Error creating {}", self.resource_type),
                format_api_error(&format!("create {}", self.endpoint.label), err),
            );
        };

        let existing = self.find_existing(client).await;
        let attribute = match self.lookup_field {
            Some(field) if duplicates.contains_key(field) => field.to_string(),
            _ => duplicates
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| self.lookup_field.unwrap_or("id").to_string()),
        };

        let mut diags = Diagnostics::new();
        diags.add_attribute_error(
            attribute,
            format!("Duplicate {}", self.resource_type),
            self.duplicate_detail(&duplicates, existing, client.base_url()),
        );
        diags
    }

    fn filters(&self, field: &'static str) -> Vec<(&str, &str)> {
        let mut filters: Vec<(&str, &str)> = self
            .scope
            .iter()
            .map(|(filter, value)| (*filter, value.as_str()))
            .collect();
        filters.push((field, self.lookup_value.as_str()));
        filters
    }

    /// Id of the one object the plan collides with. Several candidates mean
    /// the scope is too wide to tell, so no id is offered.
    async fn find_existing(&self, client: &dyn NetBoxClientTrait) -> Option<u64> {
        let field = self.lookup_field?;
        if self.lookup_value.is_empty() {
            return None;
        }
        let filters = self.filters(field);
        match client.list(self.endpoint, &filters, false).await {
            Ok(found) if found.len() == 1 => {
                let id = found.first().and_then(|object| object.get("id")).and_then(Value::as_u64);
                debug!("Existing {} matching {:?}: {:?}", self.endpoint.label, filters, id);
                id
            }
            Ok(found) => {
                debug!(
                    "{} existing {}(s) match {:?}, not suggesting an id",
                    found.len(),
                    self.endpoint.label,
                    filters
                );
                None
            }
            Err(e) => {
                warn!("Could not look up existing {}: {}", self.endpoint.label, e);
                None
            }
        }
    }

    fn duplicate_detail(
        &self,
        duplicates: &BTreeMap<String, Vec<String>>,
        existing: Option<u64>,
        base_url: &str,
    ) -> String {
        let address = format!("{}.{}", self.resource_type, resource_label(&self.lookup_value));
        let mut out = String::from("A resource with the same unique identifier(s) already exists in Netbox.\n\n");
        out.push_str("Conflicting fields:\n");
        for (field, messages) in duplicates {
            for message in messages {
                let _ = writeln!(out, "  - {}: {}", field, message);
            }
        }
        out.push('\n');

        match existing {
            Some(id) => {
                out.push_str("To import the existing resource into Terraform state, run:\n\n");
                let _ = writeln!(out, "  terraform import {} {}\n", address, id);
                out.push_str("Or add an import block to your configuration:\n\n");
                let _ = writeln!(out, "  import {{\n    to = {}\n    id = \"{}\"\n  }}", address, id);
            }
            None => match self.lookup_field.filter(|_| !self.lookup_value.is_empty()) {
                Some(field) => {
                    let _ = writeln!(
                        out,
                        "To import the existing resource, find it in Netbox by {} \"{}\",",
                        field, self.lookup_value
                    );
                    out.push_str("get its ID, and then run:\n\n");
                    let _ = writeln!(out, "  terraform import {} <ID>\n", address);
                    out.push_str("Or use the Netbox API to find the ID:\n\n");
                    out.push_str("  curl -H \"Authorization: Token $NETBOX_API_TOKEN\" \\\n");
                    let query: Vec<String> = self
                        .filters(field)
                        .iter()
                        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                        .collect();
                    let _ = writeln!(
                        out,
                        "       \"{}{}?{}\"",
                        base_url.trim_end_matches('/'),
                        self.endpoint.collection_path(),
                        query.join("&")
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "To import the existing resource, find the {} in Netbox, get its ID, and then run:\n",
                        self.endpoint.label
                    );
                    let _ = writeln!(out, "  terraform import {} <ID>", address);
                }
            },
        }
        out
    }
}

// Terraform resource names are identifiers; slugs mostly are already
fn resource_label(value: &str) -> String {
    let label: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if label.is_empty() {
        "<name>".to_string()
    } else {
        label
    }
}
