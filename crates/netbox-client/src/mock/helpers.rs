//! Helper functions for shaping mock objects like NetBox responses

use super::Store;
use crate::endpoint::{self, Endpoint};
use crate::error::NetBoxError;
use serde_json::{json, Map, Value};

/// Foreign keys per endpoint: `(endpoint path, field, target endpoint)`
const RELATIONS: &[(&str, &str, Endpoint)] = &[
    ("dcim/regions", "parent", endpoint::REGIONS),
    ("dcim/site-groups", "parent", endpoint::SITE_GROUPS),
    ("dcim/sites", "region", endpoint::REGIONS),
    ("dcim/sites", "group", endpoint::SITE_GROUPS),
    ("dcim/sites", "tenant", endpoint::TENANTS),
    ("dcim/locations", "site", endpoint::SITES),
    ("dcim/locations", "parent", endpoint::LOCATIONS),
    ("dcim/locations", "tenant", endpoint::TENANTS),
    ("dcim/platforms", "manufacturer", endpoint::MANUFACTURERS),
    ("dcim/device-types", "manufacturer", endpoint::MANUFACTURERS),
    ("dcim/device-types", "default_platform", endpoint::PLATFORMS),
    ("dcim/device-roles", "config_template", endpoint::CONFIG_TEMPLATES),
    ("dcim/devices", "device_type", endpoint::DEVICE_TYPES),
    ("dcim/devices", "role", endpoint::DEVICE_ROLES),
    ("dcim/devices", "tenant", endpoint::TENANTS),
    ("dcim/devices", "platform", endpoint::PLATFORMS),
    ("dcim/devices", "site", endpoint::SITES),
    ("dcim/devices", "location", endpoint::LOCATIONS),
    ("dcim/interfaces", "device", endpoint::DEVICES),
    ("dcim/interfaces", "parent", endpoint::INTERFACES),
    ("dcim/interfaces", "bridge", endpoint::INTERFACES),
    ("dcim/interfaces", "lag", endpoint::INTERFACES),
    ("tenancy/tenant-groups", "parent", endpoint::TENANT_GROUPS),
    ("tenancy/tenants", "group", endpoint::TENANT_GROUPS),
    ("tenancy/contact-groups", "parent", endpoint::CONTACT_GROUPS),
    ("tenancy/contacts", "group", endpoint::CONTACT_GROUPS),
    ("ipam/aggregates", "rir", endpoint::RIRS),
    ("ipam/aggregates", "tenant", endpoint::TENANTS),
    ("ipam/vrfs", "tenant", endpoint::TENANTS),
    ("ipam/vlans", "site", endpoint::SITES),
    ("ipam/vlans", "group", endpoint::VLAN_GROUPS),
    ("ipam/vlans", "tenant", endpoint::TENANTS),
    ("ipam/vlans", "role", endpoint::IPAM_ROLES),
    ("ipam/prefixes", "vrf", endpoint::VRFS),
    ("ipam/prefixes", "tenant", endpoint::TENANTS),
    ("ipam/prefixes", "vlan", endpoint::VLANS),
    ("ipam/prefixes", "role", endpoint::IPAM_ROLES),
    ("ipam/ip-addresses", "vrf", endpoint::VRFS),
    ("ipam/ip-addresses", "tenant", endpoint::TENANTS),
    ("circuits/circuits", "provider", endpoint::CIRCUIT_PROVIDERS),
    ("circuits/circuits", "type", endpoint::CIRCUIT_TYPES),
    ("circuits/circuits", "tenant", endpoint::TENANTS),
    ("vpn/tunnels", "group", endpoint::TUNNEL_GROUPS),
    ("vpn/tunnels", "ipsec_profile", endpoint::IPSEC_PROFILES),
    ("vpn/tunnels", "tenant", endpoint::TENANTS),
    ("vpn/l2vpns", "tenant", endpoint::TENANTS),
    ("vpn/l2vpn-terminations", "l2vpn", endpoint::L2VPNS),
];

/// Many-to-many foreign keys, sent as a list of ids
const LIST_RELATIONS: &[(&str, &str, Endpoint)] = &[
    ("vpn/l2vpns", "import_targets", endpoint::ROUTE_TARGETS),
    ("vpn/l2vpns", "export_targets", endpoint::ROUTE_TARGETS),
];

/// Choice fields other than `status`, which is a choice everywhere
const CHOICES: &[(&str, &str)] = &[
    ("dcim/interfaces", "type"),
    ("dcim/interfaces", "duplex"),
    ("dcim/interfaces", "mode"),
    ("dcim/device-types", "subdevice_role"),
    ("dcim/device-types", "airflow"),
    ("dcim/device-types", "weight_unit"),
    ("dcim/devices", "airflow"),
    ("ipam/ip-addresses", "role"),
    ("vpn/tunnels", "encapsulation"),
    ("vpn/l2vpns", "type"),
];

/// Display string the way NetBox derives it for each object type
pub(crate) fn display_of(object: &Map<String, Value>, id: u64) -> String {
    ["name", "model", "cid", "address", "prefix"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| object.get("vid").map(ToString::to_string))
        .unwrap_or_else(|| id.to_string())
}

/// Brief nested representation of a stored object
fn brief_of(object: &Value) -> Value {
    let mut brief = Map::new();
    for key in ["id", "url", "display", "name", "model", "slug", "cid", "vid"] {
        if let Some(value) = object.get(key) {
            brief.insert(key.to_string(), value.clone());
        }
    }
    Value::Object(brief)
}

/// Helper to create a choice value, e.g. `decommissioning` -> `Decommissioning`
fn choice_of(value: &str) -> Value {
    let label = value
        .split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    json!({"value": value, "label": label})
}

fn related_not_found(endpoint: &Endpoint, field: &str, id: &Value) -> NetBoxError {
    NetBoxError::BadRequest {
        path: endpoint.collection_path(),
        body: json!({
            field: [format!("Related object not found using the provided numeric ID: {}", id)]
        })
        .to_string(),
    }
}

/// Shape one request field the way NetBox would return it
pub(crate) fn expand_field(
    store: &Store,
    base_url: &str,
    endpoint: &Endpoint,
    field: &str,
    value: &Value,
) -> Result<Value, NetBoxError> {
    if let Some((_, _, target)) = RELATIONS
        .iter()
        .find(|(path, name, _)| *path == endpoint.path && *name == field)
    {
        return match value {
            Value::Null => Ok(Value::Null),
            Value::Number(n) => n
                .as_u64()
                .and_then(|id| store.get(target.path).and_then(|objects| objects.get(&id)))
                .map(brief_of)
                .ok_or_else(|| related_not_found(endpoint, field, value)),
            other => Ok(other.clone()),
        };
    }

    if let Some((_, _, target)) = LIST_RELATIONS
        .iter()
        .find(|(path, name, _)| *path == endpoint.path && *name == field)
    {
        let Some(ids) = value.as_array() else {
            return Ok(value.clone());
        };
        return ids
            .iter()
            .map(|id| {
                id.as_u64()
                    .and_then(|id| store.get(target.path).and_then(|objects| objects.get(&id)))
                    .map(brief_of)
                    .ok_or_else(|| related_not_found(endpoint, field, id))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }

    let is_choice = field == "status"
        || CHOICES
            .iter()
            .any(|(path, name)| *path == endpoint.path && *name == field);
    if is_choice {
        return Ok(match value.as_str() {
            Some("") => Value::Null,
            Some(s) => choice_of(s),
            None => value.clone(),
        });
    }

    if field == "tags" {
        return Ok(expand_tags(store, base_url, value));
    }

    Ok(value.clone())
}

/// Tags are sent as `{name, slug}`; fill in id and color from stored tags.
fn expand_tags(store: &Store, base_url: &str, value: &Value) -> Value {
    let Some(tags) = value.as_array() else {
        return value.clone();
    };
    let stored = store.get(endpoint::TAGS.path);
    let expanded = tags
        .iter()
        .map(|tag| {
            let slug = tag.get("slug").and_then(Value::as_str).unwrap_or_default();
            stored
                .and_then(|objects| {
                    objects
                        .values()
                        .find(|object| object.get("slug").and_then(Value::as_str) == Some(slug))
                })
                .cloned()
                .unwrap_or_else(|| {
                    json!({
                        "id": 0,
                        "url": format!("{}/api/extras/tags/?slug={}", base_url, slug),
                        "display": tag.get("name").cloned().unwrap_or(Value::Null),
                        "name": tag.get("name").cloned().unwrap_or(Value::Null),
                        "slug": slug,
                    })
                })
        })
        .collect();
    Value::Array(expanded)
}

/// Fields unique within one collection besides `slug`, with the fields that
/// scope the uniqueness (interface names are unique per device)
const UNIQUE: &[(&str, &str, &[&str])] = &[
    ("circuits/circuits", "cid", &[]),
    ("ipam/rirs", "name", &[]),
    ("extras/tags", "name", &[]),
    ("dcim/devices", "name", &["site", "tenant"]),
    ("dcim/interfaces", "name", &["device"]),
    ("vpn/l2vpn-terminations", "assigned_object_id", &["assigned_object_type"]),
];

/// Stored references are brief objects; requests carry the bare id
fn reference_key(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Object(brief)) => brief.get("id").cloned().unwrap_or(Value::Null),
        Some(other) => other.clone(),
        None => Value::Null,
    }
}

/// NetBox enforces slug uniqueness per object type, and a few other fields
pub(crate) fn check_unique(
    store: &Store,
    endpoint: &Endpoint,
    id: u64,
    fields: &Map<String, Value>,
) -> Result<(), NetBoxError> {
    let unique = std::iter::once(("slug", &[] as &[&str])).chain(
        UNIQUE
            .iter()
            .filter(|(path, _, _)| *path == endpoint.path)
            .map(|(_, field, scope)| (*field, *scope)),
    );
    for (field, scope) in unique {
        let Some(value) = fields.get(field).filter(|v| v.is_string() || v.is_number()) else {
            continue;
        };
        let taken = store.get(endpoint.path).is_some_and(|objects| {
            objects.iter().any(|(other_id, object)| {
                *other_id != id
                    && object.get(field) == Some(value)
                    && scope
                        .iter()
                        .all(|s| reference_key(object.get(*s)) == reference_key(fields.get(*s)))
            })
        });
        if taken {
            let message = if scope.is_empty() {
                format!("{} with this {} already exists.", endpoint.label, field)
            } else {
                format!(
                    "{} with this {} and {} already exists.",
                    endpoint.label,
                    scope.join(", "),
                    field
                )
            };
            return Err(NetBoxError::BadRequest {
                path: endpoint.collection_path(),
                body: json!({ field: [message] }).to_string(),
            });
        }
    }
    Ok(())
}
