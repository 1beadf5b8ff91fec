//! VPN models: tunnels, L2VPNs and L2VPN terminations.
//!
//! Tunnel groups use [`super::OrganizationalObject`].

use super::{netbox_object, BriefRef, ChoiceValue, NestedTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tunnel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunnel {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub status: Option<ChoiceValue>,
    pub group: Option<BriefRef>,
    pub encapsulation: Option<ChoiceValue>,
    pub ipsec_profile: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub tunnel_id: Option<i64>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for tunnels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableTunnelRequest {
    pub name: String,
    pub status: String,
    pub group: Option<u64>,
    pub encapsulation: String,
    pub ipsec_profile: Option<u64>,
    pub tenant: Option<u64>,
    pub tunnel_id: Option<i64>,
    pub description: String,
    pub comments: String,
}

/// Layer 2 VPN
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct L2vpn {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub l2vpn_type: Option<ChoiceValue>,
    pub identifier: Option<i64>,
    pub import_targets: Vec<BriefRef>,
    pub export_targets: Vec<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for L2VPNs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableL2vpnRequest {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub l2vpn_type: String,
    pub identifier: Option<i64>,
    /// Route target ids; empty clears
    pub import_targets: Vec<u64>,
    pub export_targets: Vec<u64>,
    pub tenant: Option<u64>,
    pub description: String,
    pub comments: String,
}

/// Attachment of an L2VPN to an interface or VLAN
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct L2vpnTermination {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub l2vpn: Option<BriefRef>,
    pub assigned_object_type: String,
    pub assigned_object_id: u64,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for L2VPN terminations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableL2vpnTerminationRequest {
    pub l2vpn: u64,
    pub assigned_object_type: String,
    pub assigned_object_id: u64,
}

netbox_object!(Tunnel, L2vpn, L2vpnTermination);
