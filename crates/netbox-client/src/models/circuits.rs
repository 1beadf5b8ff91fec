//! Circuit models

use super::{netbox_object, BriefRef, ChoiceValue, NestedTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Circuit provider (carrier)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitProvider {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for circuit providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableCircuitProviderRequest {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub comments: String,
}

/// Circuit type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitType {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub description: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for circuit types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableCircuitTypeRequest {
    pub name: String,
    pub slug: String,
    pub color: String,
    pub description: String,
}

/// Circuit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Circuit {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub cid: String,
    pub provider: Option<BriefRef>,
    #[serde(rename = "type")]
    pub circuit_type: Option<BriefRef>,
    pub status: Option<ChoiceValue>,
    pub tenant: Option<BriefRef>,
    pub install_date: Option<String>,
    pub termination_date: Option<String>,
    pub commit_rate: Option<i64>,
    pub description: String,
    pub comments: String,
    pub tags: Vec<NestedTag>,
    pub custom_fields: Map<String, Value>,
}

/// Writable body for circuits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableCircuitRequest {
    pub cid: String,
    pub provider: u64,
    #[serde(rename = "type")]
    pub circuit_type: u64,
    pub status: String,
    pub tenant: Option<u64>,
    pub install_date: Option<String>,
    pub termination_date: Option<String>,
    pub commit_rate: Option<i32>,
    pub description: String,
    pub comments: String,
}

netbox_object!(CircuitProvider, CircuitType, Circuit);
