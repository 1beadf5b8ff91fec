//! NetBox API models
//!
//! These models match the NetBox REST API serializers. Response models use
//! `#[serde(default)]` so that fields missing from older NetBox releases do
//! not break decoding. Writable request models carry foreign keys as plain
//! integer ids; an absent optional reference is sent as `null` so that a
//! full replacement (PUT) clears it.

pub mod circuits;
pub mod dcim;
pub mod extras;
pub mod ipam;
pub mod organization;
pub mod tenancy;
pub mod vpn;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use circuits::*;
pub use dcim::*;
pub use extras::*;
pub use ipam::*;
pub use organization::*;
pub use tenancy::*;
pub use vpn::*;

/// Brief nested representation of a related object
///
/// NetBox embeds related objects as `{id, url, display, name, slug}`.
/// Device types use `model` instead of `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefRef {
    pub id: u64,
    pub url: String,
    pub display: String,
    #[serde(alias = "model")]
    pub name: String,
    pub slug: String,
}

impl BriefRef {
    /// The most specific human-facing identifier: slug, then name, then display, then id
    pub fn canonical(&self) -> String {
        [&self.slug, &self.name, &self.display]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Choice field value, e.g. `{"value": "active", "label": "Active"}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceValue {
    pub value: String,
    pub label: String,
}

/// Tag as embedded in other objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedTag {
    pub id: u64,
    pub url: String,
    pub display: String,
    pub name: String,
    pub slug: String,
    pub color: String,
}

/// Tag reference sent in writable requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedTagRequest {
    pub name: String,
    pub slug: String,
}

/// Fields every NetBox object shares
pub trait NetBoxObject {
    /// Object id
    fn id(&self) -> u64;

    /// Display string
    fn display(&self) -> &str;

    /// Assigned tags
    fn tags(&self) -> &[NestedTag] {
        &[]
    }

    /// Custom field values keyed by field name, if the type supports them
    fn custom_fields(&self) -> Option<&Map<String, Value>> {
        None
    }
}

/// Implement [`NetBoxObject`] for a model with the standard
/// `id`, `display`, `tags` and `custom_fields` fields.
macro_rules! netbox_object {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::models::NetBoxObject for $model {
                fn id(&self) -> u64 {
                    self.id
                }

                fn display(&self) -> &str {
                    &self.display
                }

                fn tags(&self) -> &[$crate::models::NestedTag] {
                    &self.tags
                }

                fn custom_fields(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
                    Some(&self.custom_fields)
                }
            }
        )+
    };
}
pub(crate) use netbox_object;
