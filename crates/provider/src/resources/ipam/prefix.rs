//! `netbox_prefix`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bool_attribute_with_default, comments_attribute, custom_fields_attribute,
    description_attribute, id_attribute, reference_attribute, status_attribute, tags_attribute,
};
use crate::utils::request::{bool_or, comments, description, string_or_empty};
use crate::utils::state::{bool_from_api, choice_from_api, reconcile_ip, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Prefix, WritablePrefixRequest};
use serde::{Deserialize, Serialize};

/// Prefix lifecycle states
pub const PREFIX_STATUSES: &[&str] = &["container", "active", "reserved", "deprecated"];

/// Prefix state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixModel {
    pub id: Attr<String>,
    pub prefix: Attr<String>,
    pub vrf: Attr<String>,
    pub tenant: Attr<String>,
    pub vlan: Attr<String>,
    pub status: Attr<String>,
    pub role: Attr<String>,
    pub is_pool: Attr<bool>,
    pub mark_utilized: Attr<bool>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(PrefixModel);

/// Prefix resource definition
#[derive(Debug, Default)]
pub struct PrefixSpec;

/// `netbox_prefix`
pub type PrefixResource = NetBoxResource<PrefixSpec>;

#[async_trait::async_trait]
impl ObjectResource for PrefixSpec {
    type Model = PrefixModel;
    type Object = Prefix;
    type Request = WritablePrefixRequest;

    const TYPE_SUFFIX: &'static str = "prefix";
    const ENDPOINT: Endpoint = endpoint::PREFIXES;
    const LOOKUP_FIELD: Option<&'static str> = Some("prefix");

    fn schema(&self) -> Schema {
        Schema::new("Manages an IP prefix in Netbox.")
            .attribute("id", id_attribute("prefix"))
            .attribute(
                "prefix",
                Attribute::required(AttributeKind::String, "The IP prefix in CIDR notation (e.g., 192.168.1.0/24).")
                    .validator(validators::ip_prefix()),
            )
            .attribute(
                "vrf",
                reference_attribute("VRF", "ID or name of the VRF this prefix is assigned to."),
            )
            .attribute(
                "tenant",
                reference_attribute("tenant", "ID or slug of the tenant this prefix is assigned to."),
            )
            .attribute(
                "vlan",
                reference_attribute("VLAN", "ID or name of the VLAN this prefix is assigned to."),
            )
            .attribute(
                "status",
                status_attribute(PREFIX_STATUSES, "active", "The status of the prefix."),
            )
            .attribute(
                "role",
                reference_attribute("role", "ID or slug of the role of this prefix."),
            )
            .attribute(
                "is_pool",
                bool_attribute_with_default(
                    "All IP addresses within this prefix are considered usable. Defaults to false.",
                    false,
                ),
            )
            .attribute(
                "mark_utilized",
                bool_attribute_with_default("Treat as fully utilized. Defaults to false.", false),
            )
            .attribute("description", description_attribute("prefix"))
            .attribute("comments", comments_attribute("prefix"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &PrefixModel,
    ) -> Result<WritablePrefixRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let vrf = lookup::resolve_optional(client, &targets::VRF, &model.vrf, "vrf", &mut diags).await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        let vlan = lookup::resolve_optional(client, &targets::VLAN, &model.vlan, "vlan", &mut diags).await;
        let role = lookup::resolve_optional(client, &targets::IPAM_ROLE, &model.role, "role", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritablePrefixRequest {
            prefix: string_or_empty(&model.prefix),
            vrf,
            tenant,
            vlan,
            status: model.status.as_str().unwrap_or("active").to_string(),
            role,
            is_pool: bool_or(&model.is_pool, false),
            mark_utilized: bool_or(&model.mark_utilized, false),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, prefix: &Prefix, model: &mut PrefixModel) {
        model.prefix = reconcile_ip(&model.prefix, &prefix.prefix);
        model.vrf = reconcile_reference(&model.vrf, prefix.vrf.as_ref());
        model.tenant = reconcile_reference(&model.tenant, prefix.tenant.as_ref());
        model.vlan = reconcile_reference(&model.vlan, prefix.vlan.as_ref());
        model.status = choice_from_api(prefix.status.as_ref(), &model.status);
        model.role = reconcile_reference(&model.role, prefix.role.as_ref());
        model.is_pool = bool_from_api(prefix.is_pool);
        model.mark_utilized = bool_from_api(prefix.mark_utilized);
        model.description = string_from_api(&prefix.description, &model.description);
        model.comments = string_from_api(&prefix.comments, &model.comments);
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
        assert_contract::<PrefixSpec>(
            "netbox_prefix",
            &["prefix"],
            &[
                "vrf", "tenant", "vlan", "status", "role", "is_pool", "mark_utilized",
                "description", "comments", "tags", "custom_fields",
            ],
            &["id", "status", "is_pool", "mark_utilized"],
        );
    }

    #[tokio::test]
    async fn zero_padded_ipv6_prefix_is_kept() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::PREFIXES, json!({"prefix": "2001:db8:100::/48", "status": "active"}))
            .unwrap();
        let prefixes = testing::resource::<PrefixSpec>(&client);

        let response = testing::read(&prefixes, json!({"id": "1", "prefix": "2001:0DB8:0100::/48"})).await;
        testing::assert_ok(&response);
        assert_eq!(response.state.unwrap()["prefix"], "2001:0DB8:0100::/48");

        // a different length is a real change
        let response = testing::read(&prefixes, json!({"id": "1", "prefix": "2001:db8:100::/56"})).await;
        assert_eq!(response.state.unwrap()["prefix"], "2001:db8:100::/48");
    }

    #[tokio::test]
    async fn vrf_by_name_and_ambiguous_vlan() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::VRFS, json!({"name": "CUST-A"})).unwrap();
        client.insert(&endpoint::VLANS, json!({"vid": 100, "name": "users"})).unwrap();
        client.insert(&endpoint::VLANS, json!({"vid": 200, "name": "users"})).unwrap();
        let prefixes = testing::resource::<PrefixSpec>(&client);

        let state = testing::create(
            &prefixes,
            json!({"prefix": "10.1.0.0/24", "vrf": "CUST-A", "vlan": "2", "is_pool": true}),
        )
        .await;
        assert_eq!(state["vrf"], "CUST-A");
        assert_eq!(state["vlan"], "2");
        assert_eq!(state["is_pool"], true);

        let response = prefixes
            .create(CreateRequest {
                plan: json!({"prefix": "10.2.0.0/24", "vlan": "users"}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "VLAN lookup failed");
        assert!(diag.detail.starts_with("Multiple VLAN objects (2) match 'users'"));
    }
}
