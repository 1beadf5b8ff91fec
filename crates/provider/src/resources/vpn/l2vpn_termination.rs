//! `netbox_l2vpn_termination`: attaches an L2VPN to an interface or VLAN

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{custom_fields_attribute, id_attribute, required_enum_attribute, tags_attribute};
use crate::utils::state::reconcile_id_reference;
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, L2vpnTermination, NetBoxClientTrait, WritableL2vpnTerminationRequest};
use serde::{Deserialize, Serialize};

/// Object types an L2VPN can terminate on
pub const ASSIGNED_OBJECT_TYPES: &[&str] = &["dcim.interface", "ipam.vlan", "virtualization.vminterface"];

/// L2VPN termination state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct L2vpnTerminationModel {
    pub id: Attr<String>,
    pub l2vpn: Attr<String>,
    pub assigned_object_type: Attr<String>,
    pub assigned_object_id: Attr<i64>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(L2vpnTerminationModel);

/// L2VPN termination resource definition
#[derive(Debug, Default)]
pub struct L2vpnTerminationSpec;

/// `netbox_l2vpn_termination`
pub type L2vpnTerminationResource = NetBoxResource<L2vpnTerminationSpec>;

#[async_trait::async_trait]
impl ObjectResource for L2vpnTerminationSpec {
    type Model = L2vpnTerminationModel;
    type Object = L2vpnTermination;
    type Request = WritableL2vpnTerminationRequest;

    const TYPE_SUFFIX: &'static str = "l2vpn_termination";
    const ENDPOINT: Endpoint = endpoint::L2VPN_TERMINATIONS;
    const LOOKUP_FIELD: Option<&'static str> = None;
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new("Manages an L2VPN termination in Netbox, binding an L2VPN to an interface or VLAN.")
            .attribute("id", id_attribute("L2VPN termination"))
            .attribute(
                "l2vpn",
                Attribute::required(AttributeKind::String, "ID of the L2VPN this termination belongs to.")
                    .validator(validators::integer_id()),
            )
            .attribute(
                "assigned_object_type",
                required_enum_attribute("Content type of the assigned object.", ASSIGNED_OBJECT_TYPES),
            )
            .attribute(
                "assigned_object_id",
                Attribute::required(AttributeKind::Int64, "ID of the assigned object (interface or VLAN)."),
            )
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &L2vpnTerminationModel,
    ) -> Result<WritableL2vpnTerminationRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let l2vpn = lookup::resolve_required(client, &targets::L2VPN, &model.l2vpn, "l2vpn", &mut diags).await;
        let assigned_object_id = model.assigned_object_id.value().copied().unwrap_or_default();
        let assigned_object_id = u64::try_from(assigned_object_id).unwrap_or_else(|_| {
            diags.add_attribute_error(
                "assigned_object_id",
                "Invalid Assigned Object ID",
                format!("Assigned object ID must be a positive number, got: {}", assigned_object_id),
            );
            0
        });
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableL2vpnTerminationRequest {
            l2vpn,
            assigned_object_type: model.assigned_object_type.as_str().unwrap_or_default().to_string(),
            assigned_object_id,
        })
    }

    fn map_to_state(&self, termination: &L2vpnTermination, model: &mut L2vpnTerminationModel) {
        model.l2vpn = reconcile_id_reference(termination.l2vpn.as_ref());
        model.assigned_object_type = Attr::Value(termination.assigned_object_type.clone());
        model.assigned_object_id = Attr::Value(i64::try_from(termination.assigned_object_id).unwrap_or(i64::MAX));
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
        assert_contract::<L2vpnTerminationSpec>(
            "netbox_l2vpn_termination",
            &["l2vpn", "assigned_object_type", "assigned_object_id"],
            &["tags", "custom_fields"],
            &["id"],
        );
    }

    #[test]
    fn l2vpn_must_be_an_id() {
        let diags = L2vpnTerminationResource::new().validate_config(&json!({
            "l2vpn": "tenant-a",
            "assigned_object_type": "ipam.vlan",
            "assigned_object_id": 4,
        }));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.iter().next().unwrap().attribute.as_deref(), Some("l2vpn"));
    }

    #[tokio::test]
    async fn terminate_on_vlan_and_import() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::L2VPNS, json!({"name": "Tenant A", "slug": "tenant-a", "type": "vxlan"}))
            .unwrap();
        client.insert(&endpoint::VLANS, json!({"vid": 100, "name": "users"})).unwrap();
        let terminations = testing::resource::<L2vpnTerminationSpec>(&client);

        let state = testing::create(
            &terminations,
            json!({"l2vpn": "1", "assigned_object_type": "ipam.vlan", "assigned_object_id": 2}),
        )
        .await;
        assert_eq!(state["id"], "3");
        assert_eq!(state["l2vpn"], "1");
        assert_eq!(state["assigned_object_id"], 2);
        assert_eq!(state["tags"], json!(null));

        let imported = testing::import(&terminations, "", Some(json!({"id": "3", "custom_fields": []}))).await;
        testing::assert_ok(&imported);
        let imported_state = imported.state.unwrap();
        assert_eq!(imported_state["assigned_object_type"], "ipam.vlan");
        assert_eq!(imported_state["l2vpn"], "1");
    }

    #[tokio::test]
    async fn duplicate_termination_has_no_lookup_hint() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::L2VPNS, json!({"name": "Tenant A", "slug": "tenant-a", "type": "vxlan"}))
            .unwrap();
        client.insert(&endpoint::VLANS, json!({"vid": 100, "name": "users"})).unwrap();
        let terminations = testing::resource::<L2vpnTerminationSpec>(&client);
        let plan = json!({"l2vpn": "1", "assigned_object_type": "ipam.vlan", "assigned_object_id": 2});
        testing::create(&terminations, plan.clone()).await;

        let response = terminations.create(crate::framework::CreateRequest { plan }).await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Duplicate netbox_l2vpn_termination");
        assert_eq!(diag.attribute.as_deref(), Some("assigned_object_id"));
        assert!(diag.detail.contains("get its ID, and then run"));
        assert!(!diag.detail.contains("curl"));
        assert_eq!(client.count(&endpoint::L2VPN_TERMINATIONS), 1);
    }

    #[tokio::test]
    async fn unknown_l2vpn_id() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let terminations = testing::resource::<L2vpnTerminationSpec>(&client);
        let response = terminations
            .create(crate::framework::CreateRequest {
                plan: json!({"l2vpn": "9", "assigned_object_type": "dcim.interface", "assigned_object_id": 1}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "L2VPN lookup failed");
        assert_eq!(diag.attribute.as_deref(), Some("l2vpn"));
    }
}
