//! IPAM models
//!
//! These models match the NetBox REST API serializers.
//! See: netbox/netbox/ipam/api/serializers_/

use super::{netbox_object, BriefRef, ChoiceValue, NestedTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Regional Internet Registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rir {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub is_private: bool,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for RIRs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableRirRequest {
    pub name: String,
    pub slug: String,
    pub is_private: bool,
    pub description: String,
}

/// VLAN group, optionally scoped to a site, region, cluster or similar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanGroup {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub scope_type: Option<String>,
    pub scope_id: Option<u64>,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for VLAN groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableVlanGroupRequest {
    pub name: String,
    pub slug: String,
    pub scope_type: Option<String>,
    pub scope_id: Option<u64>,
    pub description: String,
}

/// Aggregate (top-level prefix allocated by an RIR)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aggregate {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub prefix: String,
    pub rir: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub date_added: Option<String>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableAggregateRequest {
    pub prefix: String,
    pub rir: u64,
    pub tenant: Option<u64>,
    pub date_added: Option<String>,
    pub description: String,
    pub comments: String,
}

/// Virtual routing and forwarding table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrf {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub rd: Option<String>,
    pub tenant: Option<BriefRef>,
    pub enforce_unique: bool,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for VRFs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableVrfRequest {
    pub name: String,
    pub rd: Option<String>,
    pub tenant: Option<u64>,
    pub enforce_unique: bool,
    pub description: String,
    pub comments: String,
}

/// VLAN model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vlan {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub vid: i64,
    pub name: String,
    pub site: Option<BriefRef>,
    pub group: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub status: Option<ChoiceValue>,
    pub role: Option<BriefRef>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for VLANs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableVlanRequest {
    pub vid: i32,
    pub name: String,
    pub site: Option<u64>,
    pub group: Option<u64>,
    pub tenant: Option<u64>,
    pub status: String,
    pub role: Option<u64>,
    pub description: String,
    pub comments: String,
}

/// Prefix model matching NetBox PrefixSerializer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefix {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub prefix: String,
    pub vrf: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub vlan: Option<BriefRef>,
    pub status: Option<ChoiceValue>,
    pub role: Option<BriefRef>,
    pub is_pool: bool,
    pub mark_utilized: bool,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for prefixes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritablePrefixRequest {
    pub prefix: String,
    pub vrf: Option<u64>,
    pub tenant: Option<u64>,
    pub vlan: Option<u64>,
    pub status: String,
    pub role: Option<u64>,
    pub is_pool: bool,
    pub mark_utilized: bool,
    pub description: String,
    pub comments: String,
}

/// IP address model matching NetBox IPAddressSerializer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddress {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub address: String,
    pub vrf: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub status: Option<ChoiceValue>,
    pub role: Option<ChoiceValue>,
    pub assigned_object_type: Option<String>,
    pub assigned_object_id: Option<u64>,
    pub dns_name: String,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for IP addresses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableIpAddressRequest {
    pub address: String,
    pub vrf: Option<u64>,
    pub tenant: Option<u64>,
    pub status: String,
    pub role: Option<String>,
    /// Sent as null to unbind the address
    pub assigned_object_type: Option<String>,
    pub assigned_object_id: Option<u64>,
    pub dns_name: String,
    pub description: String,
    pub comments: String,
}

netbox_object!(Rir, VlanGroup, Aggregate, Vrf, Vlan, Prefix, IpAddress);
