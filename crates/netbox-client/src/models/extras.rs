//! Extras models: tags

use super::NetBoxObject;
use serde::{Deserialize, Serialize};

/// Tag model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub description: String,
    /// Content types the tag may be applied to; empty means any
    pub object_types: Vec<String>,
}

/// Writable body for tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritableTagRequest {
    pub name: String,
    pub slug: String,
    pub color: String,
    pub description: String,
    pub object_types: Vec<String>,
}

impl NetBoxObject for Tag {
    fn id(&self) -> u64 {
        self.id
    }

    fn display(&self) -> &str {
        &self.display
    }
}
