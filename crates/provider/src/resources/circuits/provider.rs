//! `netbox_provider`: a circuit provider (carrier)

use crate::framework::{Attr, Diagnostics, Schema};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, string_or_empty};
use crate::utils::state::string_from_api;
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, CircuitProvider, Endpoint, NetBoxClientTrait, WritableCircuitProviderRequest};
use serde::{Deserialize, Serialize};

/// Circuit provider state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitProviderModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(CircuitProviderModel);

/// Circuit provider resource definition
#[derive(Debug, Default)]
pub struct CircuitProviderSpec;

/// `netbox_provider`
pub type CircuitProviderResource = NetBoxResource<CircuitProviderSpec>;

#[async_trait::async_trait]
impl ObjectResource for CircuitProviderSpec {
    type Model = CircuitProviderModel;
    type Object = CircuitProvider;
    type Request = WritableCircuitProviderRequest;

    const TYPE_SUFFIX: &'static str = "provider";
    const ENDPOINT: Endpoint = endpoint::CIRCUIT_PROVIDERS;

    fn schema(&self) -> Schema {
        Schema::new("Manages a circuit provider in Netbox, the carrier or ISP delivering circuits.")
            .attribute("id", id_attribute("provider"))
            .attribute("name", name_attribute("provider", 100))
            .attribute("slug", slug_attribute("provider"))
            .attribute("description", description_attribute("provider"))
            .attribute("comments", comments_attribute("provider"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        _client: &dyn NetBoxClientTrait,
        model: &CircuitProviderModel,
    ) -> Result<WritableCircuitProviderRequest, Diagnostics> {
        Ok(WritableCircuitProviderRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, provider: &CircuitProvider, model: &mut CircuitProviderModel) {
        model.name = Attr::Value(provider.name.clone());
        model.slug = Attr::Value(provider.slug.clone());
        model.description = string_from_api(&provider.description, &model.description);
        model.comments = string_from_api(&provider.comments, &model.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<CircuitProviderSpec>(
            "netbox_provider",
            &["name", "slug"],
            &["description", "comments", "tags", "custom_fields"],
            &["id"],
        );
    }

    #[tokio::test]
    async fn comments_round_trip() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let providers = testing::resource::<CircuitProviderSpec>(&client);

        let state = testing::create(
            &providers,
            json!({"name": "Level3", "slug": "level3", "comments": "NOC: +1 555 0100"}),
        )
        .await;
        assert_eq!(state["comments"], "NOC: +1 555 0100");
        assert_eq!(client.get_object(&endpoint::CIRCUIT_PROVIDERS, 1).unwrap()["comments"], "NOC: +1 555 0100");
    }
}
