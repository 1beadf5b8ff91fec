//! DCIM models: sites, locations, platforms, device roles, device types,
//! devices and interfaces.

use super::{netbox_object, BriefRef, ChoiceValue, NestedTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Site model matching NetBox SiteSerializer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub status: Option<ChoiceValue>,
    pub region: Option<BriefRef>,
    pub group: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub facility: String,
    pub time_zone: Option<String>,
    pub physical_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for sites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableSiteRequest {
    pub name: String,
    pub slug: String,
    pub status: String,
    pub region: Option<u64>,
    pub group: Option<u64>,
    pub tenant: Option<u64>,
    pub facility: String,
    pub time_zone: Option<String>,
    pub physical_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    pub comments: String,
}

/// Location model matching NetBox LocationSerializer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub site: Option<BriefRef>,
    pub parent: Option<BriefRef>,
    pub status: Option<ChoiceValue>,
    pub tenant: Option<BriefRef>,
    pub facility: String,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableLocationRequest {
    pub name: String,
    pub slug: String,
    pub site: u64,
    pub parent: Option<u64>,
    pub status: String,
    pub tenant: Option<u64>,
    pub facility: String,
    pub description: String,
}

/// Platform model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub manufacturer: Option<BriefRef>,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritablePlatformRequest {
    pub name: String,
    pub slug: String,
    pub manufacturer: Option<u64>,
    pub description: String,
}

/// Device role model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRole {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub vm_role: bool,
    pub config_template: Option<BriefRef>,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for device roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableDeviceRoleRequest {
    pub name: String,
    pub slug: String,
    pub color: String,
    pub vm_role: bool,
    pub config_template: Option<u64>,
    pub description: String,
}

/// Device type model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceType {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub manufacturer: Option<BriefRef>,
    pub default_platform: Option<BriefRef>,
    pub model: String,
    pub slug: String,
    pub part_number: String,
    pub u_height: f64,
    pub exclude_from_utilization: bool,
    pub is_full_depth: bool,
    pub subdevice_role: Option<ChoiceValue>,
    pub airflow: Option<ChoiceValue>,
    pub weight: Option<f64>,
    pub weight_unit: Option<ChoiceValue>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for device types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableDeviceTypeRequest {
    pub manufacturer: u64,
    pub default_platform: Option<u64>,
    pub model: String,
    pub slug: String,
    pub part_number: String,
    pub u_height: f64,
    pub exclude_from_utilization: bool,
    pub is_full_depth: bool,
    pub subdevice_role: Option<String>,
    pub airflow: Option<String>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub description: String,
    pub comments: String,
}

/// Device model matching NetBox DeviceWithConfigContextSerializer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: Option<String>,
    pub device_type: Option<BriefRef>,
    pub role: Option<BriefRef>,
    pub tenant: Option<BriefRef>,
    pub platform: Option<BriefRef>,
    pub serial: String,
    pub asset_tag: Option<String>,
    pub site: Option<BriefRef>,
    pub location: Option<BriefRef>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<ChoiceValue>,
    pub airflow: Option<ChoiceValue>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for devices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableDeviceRequest {
    pub name: Option<String>,
    pub device_type: u64,
    pub role: u64,
    pub tenant: Option<u64>,
    pub platform: Option<u64>,
    pub serial: String,
    pub asset_tag: Option<String>,
    pub site: u64,
    pub location: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: String,
    pub airflow: Option<String>,
    pub description: String,
    pub comments: String,
}

/// Interface model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub device: Option<BriefRef>,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub interface_type: Option<ChoiceValue>,
    pub enabled: bool,
    pub parent: Option<BriefRef>,
    pub bridge: Option<BriefRef>,
    pub lag: Option<BriefRef>,
    pub mtu: Option<i64>,
    pub mac_address: Option<String>,
    pub speed: Option<i64>,
    pub duplex: Option<ChoiceValue>,
    pub wwn: Option<String>,
    pub mgmt_only: bool,
    pub mode: Option<ChoiceValue>,
    pub mark_connected: bool,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for interfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableInterfaceRequest {
    pub device: u64,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    pub enabled: bool,
    pub parent: Option<u64>,
    pub bridge: Option<u64>,
    pub lag: Option<u64>,
    pub mtu: Option<i32>,
    pub mac_address: Option<String>,
    pub speed: Option<i32>,
    pub duplex: Option<String>,
    pub wwn: Option<String>,
    pub mgmt_only: bool,
    pub mode: Option<String>,
    pub mark_connected: bool,
    pub description: String,
}

netbox_object!(Site, Location, Platform, DeviceRole, DeviceType, Device, Interface);
