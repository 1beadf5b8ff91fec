//! Tenancy models: tenants and contacts.
//!
//! Tenant groups, contact groups and contact roles use
//! [`super::OrganizationalObject`].

use super::{netbox_object, BriefRef, NestedTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tenant model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tenant {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub group: Option<BriefRef>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for tenants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableTenantRequest {
    pub name: String,
    pub slug: String,
    pub group: Option<u64>,
    pub description: String,
    pub comments: String,
}

/// Contact model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub group: Option<BriefRef>,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub link: String,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for contacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableContactRequest {
    pub name: String,
    pub group: Option<u64>,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub link: String,
    pub description: String,
    pub comments: String,
}

netbox_object!(Tenant, Contact);
