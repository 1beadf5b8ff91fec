//! Organizational objects
//!
//! Regions, site groups, tenant groups, contact groups, manufacturers,
//! contact roles and tunnel groups all serialize as a name and slug with an
//! optional parent, so they share one model.

use super::{netbox_object, BriefRef, NestedTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Organizational object (see module docs for the covered types)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationalObject {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub parent: Option<BriefRef>,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

netbox_object!(OrganizationalObject);

/// Writable body for organizational objects
///
/// `parent` is left out of the body for the flat types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableOrganizationalRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Option<u64>>,
    pub description: String,
}
