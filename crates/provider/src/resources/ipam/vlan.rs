//! `netbox_vlan`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, reference_attribute, status_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_int32, string_or_empty};
use crate::utils::state::{choice_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Vlan, WritableVlanRequest};
use serde::{Deserialize, Serialize};

/// VLAN lifecycle states
pub const VLAN_STATUSES: &[&str] = &["active", "reserved", "deprecated"];

/// VLAN state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanModel {
    pub id: Attr<String>,
    pub vid: Attr<i64>,
    pub name: Attr<String>,
    pub site: Attr<String>,
    pub group: Attr<String>,
    pub tenant: Attr<String>,
    pub status: Attr<String>,
    pub role: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(VlanModel);

/// VLAN resource definition
#[derive(Debug, Default)]
pub struct VlanSpec;

/// `netbox_vlan`
pub type VlanResource = NetBoxResource<VlanSpec>;

#[async_trait::async_trait]
impl ObjectResource for VlanSpec {
    type Model = VlanModel;
    type Object = Vlan;
    type Request = WritableVlanRequest;

    const TYPE_SUFFIX: &'static str = "vlan";
    const ENDPOINT: Endpoint = endpoint::VLANS;
    const LOOKUP_FIELD: Option<&'static str> = Some("name");

    fn schema(&self) -> Schema {
        Schema::new("Manages a VLAN in Netbox.")
            .attribute("id", id_attribute("VLAN"))
            .attribute(
                "vid",
                Attribute::required(AttributeKind::Int64, "Numeric VLAN ID (1-4094). Required.")
                    .validator(validators::vlan_id()),
            )
            .attribute("name", name_attribute("VLAN", 64))
            .attribute(
                "site",
                reference_attribute("site", "ID or slug of the site this VLAN is assigned to."),
            )
            .attribute(
                "group",
                reference_attribute("VLAN group", "ID or slug of the VLAN group this VLAN belongs to."),
            )
            .attribute(
                "tenant",
                reference_attribute("tenant", "ID or slug of the tenant this VLAN belongs to."),
            )
            .attribute(
                "status",
                status_attribute(VLAN_STATUSES, "active", "Operational status of the VLAN."),
            )
            .attribute(
                "role",
                reference_attribute("role", "ID or slug of the role assigned to this VLAN."),
            )
            .attribute("description", description_attribute("VLAN"))
            .attribute("comments", comments_attribute("VLAN"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &VlanModel,
    ) -> Result<WritableVlanRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let site = lookup::resolve_optional(client, &targets::SITE, &model.site, "site", &mut diags).await;
        let group = lookup::resolve_optional(client, &targets::VLAN_GROUP, &model.group, "group", &mut diags).await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        let role = lookup::resolve_optional(client, &targets::IPAM_ROLE, &model.role, "role", &mut diags).await;
        let vid = optional_int32(&model.vid, "vid", &mut diags);
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableVlanRequest {
            vid: vid.unwrap_or_default(),
            name: string_or_empty(&model.name),
            site,
            group,
            tenant,
            status: model.status.as_str().unwrap_or("active").to_string(),
            role,
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, vlan: &Vlan, model: &mut VlanModel) {
        model.vid = Attr::Value(vlan.vid);
        model.name = Attr::Value(vlan.name.clone());
        model.site = reconcile_reference(&model.site, vlan.site.as_ref());
        model.group = reconcile_reference(&model.group, vlan.group.as_ref());
        model.tenant = reconcile_reference(&model.tenant, vlan.tenant.as_ref());
        model.status = choice_from_api(vlan.status.as_ref(), &model.status);
        model.role = reconcile_reference(&model.role, vlan.role.as_ref());
        model.description = string_from_api(&vlan.description, &model.description);
        model.comments = string_from_api(&vlan.comments, &model.comments);
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
        assert_contract::<VlanSpec>(
            "netbox_vlan",
            &["vid", "name"],
            &["site", "group", "tenant", "status", "role", "description", "comments", "tags", "custom_fields"],
            &["id", "status"],
        );
    }

    #[test]
    fn vid_range() {
        let resource = VlanResource::new();
        assert!(resource.validate_config(&json!({"vid": 4094, "name": "top"})).is_empty());
        let diags = resource.validate_config(&json!({"vid": 4095, "name": "over"}));
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid VLAN ID");
    }

    #[tokio::test]
    async fn group_and_role() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::VLAN_GROUPS, json!({"name": "Campus", "slug": "campus"}))
            .unwrap();
        client
            .insert(&endpoint::IPAM_ROLES, json!({"name": "Production", "slug": "production"}))
            .unwrap();
        let vlans = testing::resource::<VlanSpec>(&client);

        let state = testing::create(
            &vlans,
            json!({"vid": 100, "name": "users", "group": "Campus", "role": "production", "status": "reserved"}),
        )
        .await;
        assert_eq!(state["vid"], 100);
        assert_eq!(state["group"], "Campus");
        assert_eq!(state["role"], "production");
        assert_eq!(state["status"], "reserved");
        assert_eq!(client.get_object(&endpoint::VLANS, 3).unwrap()["display"], "users");
    }
}
