//! `netbox_tag`
//!
//! Tags cannot themselves be tagged and carry no custom fields.

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{color_attribute, description_attribute, id_attribute, name_attribute, slug_attribute};
use crate::utils::request::{description, string_or_empty};
use crate::utils::state::string_from_api;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Tag, WritableTagRequest};
use serde::{Deserialize, Serialize};

/// Tag state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub color: Attr<String>,
    pub description: Attr<String>,
    pub object_types: Attr<Vec<String>>,
}

state_model!(@untagged TagModel);

/// Tag resource definition
#[derive(Debug, Default)]
pub struct TagSpec;

/// `netbox_tag`
pub type TagResource = NetBoxResource<TagSpec>;

#[async_trait::async_trait]
impl ObjectResource for TagSpec {
    type Model = TagModel;
    type Object = Tag;
    type Request = WritableTagRequest;

    const TYPE_SUFFIX: &'static str = "tag";
    const ENDPOINT: Endpoint = endpoint::TAGS;

    fn schema(&self) -> Schema {
        Schema::new("Manages a tag in Netbox. Other resources refer to tags by slug.")
            .attribute("id", id_attribute("tag"))
            .attribute("name", name_attribute("tag", 100))
            .attribute("slug", slug_attribute("tag"))
            .attribute("color", color_attribute("tag"))
            .attribute("description", description_attribute("tag"))
            .attribute(
                "object_types",
                Attribute::optional(
                    AttributeKind::List(Box::new(AttributeKind::String)),
                    "Object types the tag may be applied to, e.g. `dcim.device`. Any type when unset.",
                ),
            )
    }

    async fn build_request(
        &self,
        _client: &dyn NetBoxClientTrait,
        model: &TagModel,
    ) -> Result<WritableTagRequest, Diagnostics> {
        Ok(WritableTagRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            color: string_or_empty(&model.color),
            description: description(&model.description),
            object_types: model.object_types.value().cloned().unwrap_or_default(),
        })
    }

    fn map_to_state(&self, tag: &Tag, model: &mut TagModel) {
        model.name = Attr::Value(tag.name.clone());
        model.slug = Attr::Value(tag.slug.clone());
        model.color = string_from_api(&tag.color, &model.color);
        model.description = string_from_api(&tag.description, &model.description);
        // an explicit empty list stays empty instead of turning null
        model.object_types = if tag.object_types.is_empty() && !model.object_types.is_known() {
            Attr::Null
        } else {
            Attr::Value(tag.object_types.clone())
        };
    }
}
