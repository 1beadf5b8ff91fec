//! `netbox_vlan_group`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    custom_fields_attribute, description_attribute, enum_attribute, id_attribute, name_attribute,
    slug_attribute, tags_attribute,
};
use crate::utils::request::{description, optional_choice, parse_id, string_or_empty};
use crate::utils::state::{enum_from_api, string_from_api};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, VlanGroup, WritableVlanGroupRequest};
use serde::{Deserialize, Serialize};

/// Object types a VLAN group can be scoped to
pub const SCOPE_TYPES: &[&str] = &[
    "dcim.site",
    "dcim.sitegroup",
    "dcim.region",
    "dcim.location",
    "dcim.rack",
    "virtualization.clustergroup",
    "virtualization.cluster",
];

/// VLAN group state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanGroupModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub scope_type: Attr<String>,
    pub scope_id: Attr<String>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(VlanGroupModel);

/// VLAN group resource definition
#[derive(Debug, Default)]
pub struct VlanGroupSpec;

/// `netbox_vlan_group`
pub type VlanGroupResource = NetBoxResource<VlanGroupSpec>;

#[async_trait::async_trait]
impl ObjectResource for VlanGroupSpec {
    type Model = VlanGroupModel;
    type Object = VlanGroup;
    type Request = WritableVlanGroupRequest;

    const TYPE_SUFFIX: &'static str = "vlan_group";
    const ENDPOINT: Endpoint = endpoint::VLAN_GROUPS;

    fn schema(&self) -> Schema {
        Schema::new("Manages a VLAN group in Netbox, optionally scoped to a site, region, location, rack or cluster.")
            .attribute("id", id_attribute("VLAN group"))
            .attribute("name", name_attribute("VLAN group", 100))
            .attribute("slug", slug_attribute("VLAN group"))
            .attribute(
                "scope_type",
                enum_attribute(
                    "Content type of the object the group is scoped to. Set together with scope_id.",
                    SCOPE_TYPES,
                ),
            )
            .attribute(
                "scope_id",
                Attribute::optional(
                    AttributeKind::String,
                    "ID of the object the group is scoped to. Set together with scope_type.",
                )
                .validator(validators::integer_id()),
            )
            .attribute("description", description_attribute("VLAN group"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        _client: &dyn NetBoxClientTrait,
        model: &VlanGroupModel,
    ) -> Result<WritableVlanGroupRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let (scope_type, scope_id) = match (optional_choice(&model.scope_type), optional_choice(&model.scope_id)) {
            (None, None) => (None, None),
            (Some(scope_type), Some(scope_id)) => match parse_id(&scope_id) {
                Ok(id) => (Some(scope_type), Some(id)),
                Err(e) => {
                    diags.add_attribute_error("scope_id", "Invalid Scope ID", e.to_string());
                    (None, None)
                }
            },
            (scope_type, _) => {
                let missing = if scope_type.is_some() { "scope_id" } else { "scope_type" };
                diags.add_attribute_error(
                    missing,
                    "Incomplete Scope",
                    "scope_type and scope_id must be set together.",
                );
                (None, None)
            }
        };
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableVlanGroupRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            scope_type,
            scope_id,
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, group: &VlanGroup, model: &mut VlanGroupModel) {
        model.name = Attr::Value(group.name.clone());
        model.slug = Attr::Value(group.slug.clone());
        model.scope_type = enum_from_api(group.scope_type.as_deref(), &model.scope_type);
        model.scope_id = group
            .scope_id
            .map_or(Attr::Null, |id| Attr::Value(id.to_string()));
        model.description = string_from_api(&group.description, &model.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{CreateRequest, Resource};
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<VlanGroupSpec>(
            "netbox_vlan_group",
            &["name", "slug"],
            &["scope_type", "scope_id", "description", "tags", "custom_fields"],
            &["id"],
        );
    }

    #[test]
    fn scope_values_are_checked() {
        let resource = VlanGroupResource::new();
        let diags = resource.validate_config(&json!({
            "name": "Fabric", "slug": "fabric", "scope_type": "dcim.building", "scope_id": "x1",
        }));
        let attributes: Vec<_> = diags.iter().filter_map(|d| d.attribute.as_deref()).collect();
        assert_eq!(attributes, ["scope_id", "scope_type"]);
    }

    #[tokio::test]
    async fn scoped_to_a_site_and_unscoped() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let groups = testing::resource::<VlanGroupSpec>(&client);

        let state = testing::create(
            &groups,
            json!({"name": "Paris fabric", "slug": "paris-fabric", "scope_type": "dcim.site", "scope_id": "3"}),
        )
        .await;
        assert_eq!(state["scope_type"], "dcim.site");
        assert_eq!(state["scope_id"], "3");
        let stored = client.get_object(&endpoint::VLAN_GROUPS, 1).unwrap();
        assert_eq!(stored["scope_id"], 3);

        let unscoped = testing::update(&groups, json!({"name": "Paris fabric", "slug": "paris-fabric"}), state).await;
        assert_eq!(unscoped["scope_type"], json!(null));
        assert_eq!(unscoped["scope_id"], json!(null));
        assert_eq!(client.get_object(&endpoint::VLAN_GROUPS, 1).unwrap()["scope_type"], json!(null));
    }

    #[tokio::test]
    async fn scope_needs_type_and_id() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let groups = testing::resource::<VlanGroupSpec>(&client);
        let response = groups
            .create(CreateRequest {
                plan: json!({"name": "Fabric", "slug": "fabric", "scope_type": "dcim.region"}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Incomplete Scope");
        assert_eq!(diag.attribute.as_deref(), Some("scope_id"));
        assert_eq!(client.count(&endpoint::VLAN_GROUPS), 0);
    }
}
