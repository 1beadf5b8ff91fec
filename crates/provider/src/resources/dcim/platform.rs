//! `netbox_platform`

use crate::framework::{Attr, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    custom_fields_attribute, description_attribute, id_attribute, name_attribute,
    reference_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{description, string_or_empty};
use crate::utils::state::{reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Platform, WritablePlatformRequest};
use serde::{Deserialize, Serialize};

/// Platform state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub manufacturer: Attr<String>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(PlatformModel);

/// Platform resource definition
#[derive(Debug, Default)]
pub struct PlatformSpec;

/// `netbox_platform`
pub type PlatformResource = NetBoxResource<PlatformSpec>;

#[async_trait::async_trait]
impl ObjectResource for PlatformSpec {
    type Model = PlatformModel;
    type Object = Platform;
    type Request = WritablePlatformRequest;

    const TYPE_SUFFIX: &'static str = "platform";
    const ENDPOINT: Endpoint = endpoint::PLATFORMS;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a platform in Netbox. A platform is the software running on a device, \
             such as an operating system or firmware family.",
        )
        .attribute("id", id_attribute("platform"))
        .attribute("name", name_attribute("platform", 100))
        .attribute("slug", slug_attribute("platform"))
        .attribute(
            "manufacturer",
            reference_attribute("manufacturer", "ID or slug of the manufacturer this platform is limited to."),
        )
        .attribute("description", description_attribute("platform"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &PlatformModel,
    ) -> Result<WritablePlatformRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let manufacturer = lookup::resolve_optional(
            client,
            &targets::MANUFACTURER,
            &model.manufacturer,
            "manufacturer",
            &mut diags,
        )
        .await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritablePlatformRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            manufacturer,
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, platform: &Platform, model: &mut PlatformModel) {
        model.name = Attr::Value(platform.name.clone());
        model.slug = Attr::Value(platform.slug.clone());
        model.manufacturer = reconcile_reference(&model.manufacturer, platform.manufacturer.as_ref());
        model.description = string_from_api(&platform.description, &model.description);
    }
}
