//! `netbox_circuit_type`

use crate::framework::{Attr, Diagnostics, Schema};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    color_attribute, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{description, string_or_empty};
use crate::utils::state::string_from_api;
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, CircuitType, Endpoint, NetBoxClientTrait, WritableCircuitTypeRequest};
use serde::{Deserialize, Serialize};

/// Circuit type state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitTypeModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub color: Attr<String>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(CircuitTypeModel);

/// Circuit type resource definition
#[derive(Debug, Default)]
pub struct CircuitTypeSpec;

/// `netbox_circuit_type`
pub type CircuitTypeResource = NetBoxResource<CircuitTypeSpec>;

#[async_trait::async_trait]
impl ObjectResource for CircuitTypeSpec {
    type Model = CircuitTypeModel;
    type Object = CircuitType;
    type Request = WritableCircuitTypeRequest;

    const TYPE_SUFFIX: &'static str = "circuit_type";
    const ENDPOINT: Endpoint = endpoint::CIRCUIT_TYPES;

    fn schema(&self) -> Schema {
        Schema::new("Manages a circuit type in Netbox (e.g. Internet transit, MPLS, dark fiber).")
            .attribute("id", id_attribute("circuit type"))
            .attribute("name", name_attribute("circuit type", 100))
            .attribute("slug", slug_attribute("circuit type"))
            .attribute("color", color_attribute("circuit type"))
            .attribute("description", description_attribute("circuit type"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        _client: &dyn NetBoxClientTrait,
        model: &CircuitTypeModel,
    ) -> Result<WritableCircuitTypeRequest, Diagnostics> {
        Ok(WritableCircuitTypeRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            color: string_or_empty(&model.color),
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, circuit_type: &CircuitType, model: &mut CircuitTypeModel) {
        model.name = Attr::Value(circuit_type.name.clone());
        model.slug = Attr::Value(circuit_type.slug.clone());
        model.color = string_from_api(&circuit_type.color, &model.color);
        model.description = string_from_api(&circuit_type.description, &model.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Resource;
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<CircuitTypeSpec>(
            "netbox_circuit_type",
            &["name", "slug"],
            &["color", "description", "tags", "custom_fields"],
            &["id"],
        );
    }

    #[test]
    fn color_is_validated() {
        let diags = CircuitTypeResource::new()
            .validate_config(&json!({"name": "Transit", "slug": "transit", "color": "#ff0000"}));
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid Color");
    }

    #[tokio::test]
    async fn color_is_optional() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let types = testing::resource::<CircuitTypeSpec>(&client);

        let plain = testing::create(&types, json!({"name": "Transit", "slug": "transit"})).await;
        assert_eq!(plain["color"], json!(null));

        let colored = testing::create(
            &types,
            json!({"name": "MPLS", "slug": "mpls", "color": "00bcd4"}),
        )
        .await;
        assert_eq!(colored["color"], "00bcd4");
    }
}
