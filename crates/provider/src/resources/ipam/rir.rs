//! `netbox_rir`

use crate::framework::{Attr, Diagnostics, Schema};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bool_attribute_with_default, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{bool_or, description, string_or_empty};
use crate::utils::state::{bool_from_api, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Rir, WritableRirRequest};
use serde::{Deserialize, Serialize};

/// RIR state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RirModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub is_private: Attr<bool>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(RirModel);

/// RIR resource definition
#[derive(Debug, Default)]
pub struct RirSpec;

/// `netbox_rir`
pub type RirResource = NetBoxResource<RirSpec>;

#[async_trait::async_trait]
impl ObjectResource for RirSpec {
    type Model = RirModel;
    type Object = Rir;
    type Request = WritableRirRequest;

    const TYPE_SUFFIX: &'static str = "rir";
    const ENDPOINT: Endpoint = endpoint::RIRS;

    fn schema(&self) -> Schema {
        Schema::new("Manages a Regional Internet Registry (RIR) in Netbox, such as RIPE or ARIN.")
            .attribute("id", id_attribute("RIR"))
            .attribute("name", name_attribute("RIR", 100))
            .attribute("slug", slug_attribute("RIR"))
            .attribute(
                "is_private",
                bool_attribute_with_default(
                    "IP space managed by this RIR is considered private. Defaults to false.",
                    false,
                ),
            )
            .attribute("description", description_attribute("RIR"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        _client: &dyn NetBoxClientTrait,
        model: &RirModel,
    ) -> Result<WritableRirRequest, Diagnostics> {
        Ok(WritableRirRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            is_private: bool_or(&model.is_private, false),
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, rir: &Rir, model: &mut RirModel) {
        model.name = Attr::Value(rir.name.clone());
        model.slug = Attr::Value(rir.slug.clone());
        model.is_private = bool_from_api(rir.is_private);
        model.description = string_from_api(&rir.description, &model.description);
    }
}
