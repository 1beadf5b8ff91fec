//! `netbox_ip_address`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, enum_attribute,
    id_attribute, reference_attribute, status_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_choice, string_or_empty};
use crate::utils::state::{
    choice_from_api, enum_from_api, int64_from_api, reconcile_ip, reconcile_reference, string_from_api,
};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, IpAddress, NetBoxClientTrait, WritableIpAddressRequest};
use serde::{Deserialize, Serialize};

/// IP address lifecycle states
pub const IP_ADDRESS_STATUSES: &[&str] = &["active", "reserved", "deprecated", "dhcp", "slaac"];

const IP_ADDRESS_ROLES: &[&str] = &[
    "loopback", "secondary", "anycast", "vip", "vrrp", "hsrp", "glbp", "carp",
];

/// Interface types an address can be bound to
pub const ASSIGNED_OBJECT_TYPES: &[&str] = &["dcim.interface", "virtualization.vminterface"];

/// IP address state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddressModel {
    pub id: Attr<String>,
    pub address: Attr<String>,
    pub vrf: Attr<String>,
    pub tenant: Attr<String>,
    pub status: Attr<String>,
    pub role: Attr<String>,
    pub assigned_object_type: Attr<String>,
    pub assigned_object_id: Attr<i64>,
    pub dns_name: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(IpAddressModel);

/// IP address resource definition
#[derive(Debug, Default)]
pub struct IpAddressSpec;

/// `netbox_ip_address`
pub type IpAddressResource = NetBoxResource<IpAddressSpec>;

#[async_trait::async_trait]
impl ObjectResource for IpAddressSpec {
    type Model = IpAddressModel;
    type Object = IpAddress;
    type Request = WritableIpAddressRequest;

    const TYPE_SUFFIX: &'static str = "ip_address";
    const ENDPOINT: Endpoint = endpoint::IP_ADDRESSES;
    const LOOKUP_FIELD: Option<&'static str> = Some("address");

    fn schema(&self) -> Schema {
        Schema::new("Manages an IP address in Netbox.")
            .attribute("id", id_attribute("IP address"))
            .attribute(
                "address",
                Attribute::required(
                    AttributeKind::String,
                    "The IP address with prefix length (e.g., 192.168.1.1/24).",
                )
                .validator(validators::ip_with_prefix()),
            )
            .attribute(
                "vrf",
                reference_attribute("VRF", "ID or name of the VRF this IP address is assigned to."),
            )
            .attribute(
                "tenant",
                reference_attribute("tenant", "ID or slug of the tenant this IP address is assigned to."),
            )
            .attribute(
                "status",
                status_attribute(IP_ADDRESS_STATUSES, "active", "The status of the IP address."),
            )
            .attribute("role", enum_attribute("The role of the IP address.", IP_ADDRESS_ROLES))
            .attribute(
                "assigned_object_type",
                enum_attribute(
                    "Content type of the interface the IP address is assigned to. Set together with assigned_object_id.",
                    ASSIGNED_OBJECT_TYPES,
                ),
            )
            .attribute(
                "assigned_object_id",
                Attribute::optional(
                    AttributeKind::Int64,
                    "ID of the interface the IP address is assigned to. Set together with assigned_object_type.",
                ),
            )
            .attribute(
                "dns_name",
                Attribute::optional(AttributeKind::String, "Hostname or FQDN (not case-sensitive)."),
            )
            .attribute("description", description_attribute("IP address"))
            .attribute("comments", comments_attribute("IP address"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &IpAddressModel,
    ) -> Result<WritableIpAddressRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let vrf = lookup::resolve_optional(client, &targets::VRF, &model.vrf, "vrf", &mut diags).await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        let (assigned_object_type, assigned_object_id) = assignment(model, &mut diags);
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableIpAddressRequest {
            address: string_or_empty(&model.address),
            vrf,
            tenant,
            status: model.status.as_str().unwrap_or("active").to_string(),
            role: optional_choice(&model.role),
            assigned_object_type,
            assigned_object_id,
            dns_name: string_or_empty(&model.dns_name),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, ip: &IpAddress, model: &mut IpAddressModel) {
        model.address = reconcile_ip(&model.address, &ip.address);
        model.vrf = reconcile_reference(&model.vrf, ip.vrf.as_ref());
        model.tenant = reconcile_reference(&model.tenant, ip.tenant.as_ref());
        model.status = choice_from_api(ip.status.as_ref(), &model.status);
        model.role = choice_from_api(ip.role.as_ref(), &model.role);
        model.assigned_object_type = enum_from_api(ip.assigned_object_type.as_deref(), &model.assigned_object_type);
        model.assigned_object_id = int64_from_api(ip.assigned_object_id.and_then(|id| i64::try_from(id).ok()));
        model.dns_name = string_from_api(&ip.dns_name, &model.dns_name);
        model.description = string_from_api(&ip.description, &model.description);
        model.comments = string_from_api(&ip.comments, &model.comments);
    }
}

/// The interface binding; type and id are set together or not at all
fn assignment(model: &IpAddressModel, diags: &mut Diagnostics) -> (Option<String>, Option<u64>) {
    let object_type = optional_choice(&model.assigned_object_type);
    let object_id = model.assigned_object_id.value().copied();
    match (object_type, object_id) {
        (None, None) => (None, None),
        (Some(object_type), Some(id)) => match u64::try_from(id) {
            Ok(id) if id > 0 => (Some(object_type), Some(id)),
            _ => {
                diags.add_attribute_error(
                    "assigned_object_id",
                    "Invalid Assigned Object ID",
                    format!("Assigned object ID must be a positive number, got: {}", id),
                );
                (None, None)
            }
        },
        (object_type, _) => {
            let missing = if object_type.is_some() { "assigned_object_id" } else { "assigned_object_type" };
            diags.add_attribute_error(
                missing,
                "Incomplete Assignment",
                "assigned_object_type and assigned_object_id must be set together.",
            );
            (None, None)
        }
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
        assert_contract::<IpAddressSpec>(
            "netbox_ip_address",
            &["address"],
            &[
                "vrf",
                "tenant",
                "status",
                "role",
                "assigned_object_type",
                "assigned_object_id",
                "dns_name",
                "description",
                "comments",
                "tags",
                "custom_fields",
            ],
            &["id", "status"],
        );
    }

    #[test]
    fn address_needs_prefix_length() {
        let diags = IpAddressResource::new().validate_config(&json!({"address": "192.0.2.10"}));
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid IP Address with Prefix");
    }

    #[tokio::test]
    async fn ipv6_spelling_survives_refresh() {
        let client = MockNetBoxClient::new("https://netbox.test");
        // NetBox stores the compressed lowercase form
        client
            .insert(&endpoint::IP_ADDRESSES, json!({"address": "2001:db8::1/64", "status": "active"}))
            .unwrap();
        let addresses = testing::resource::<IpAddressSpec>(&client);

        for spelling in ["2001:0DB8:0000::0001/64", "2001:DB8::1/64"] {
            let response = testing::read(&addresses, json!({"id": "1", "address": spelling})).await;
            testing::assert_ok(&response);
            assert_eq!(response.state.unwrap()["address"], spelling);
        }

        let response = testing::read(&addresses, json!({"id": "1", "address": "2001:db8::2/64"})).await;
        assert_eq!(response.state.unwrap()["address"], "2001:db8::1/64");
    }

    #[tokio::test]
    async fn role_and_dns_name() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let addresses = testing::resource::<IpAddressSpec>(&client);

        let state = testing::create(
            &addresses,
            json!({"address": "192.0.2.1/32", "role": "loopback", "dns_name": "leaf01.example.net"}),
        )
        .await;
        assert_eq!(state["role"], "loopback");
        assert_eq!(state["status"], "active");
        assert_eq!(state["dns_name"], "leaf01.example.net");
        assert_eq!(client.get_object(&endpoint::IP_ADDRESSES, 1).unwrap()["role"]["label"], "Loopback");

        let updated = testing::update(
            &addresses,
            json!({"address": "192.0.2.1/32", "status": "deprecated"}),
            state,
        )
        .await;
        assert_eq!(updated["role"], json!(null));
        assert_eq!(updated["dns_name"], json!(null));
        assert_eq!(updated["status"], "deprecated");
    }

    #[tokio::test]
    async fn bind_to_interface_and_unbind() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let addresses = testing::resource::<IpAddressSpec>(&client);

        let state = testing::create(
            &addresses,
            json!({"address": "10.0.0.1/31", "assigned_object_type": "dcim.interface", "assigned_object_id": 12}),
        )
        .await;
        assert_eq!(state["assigned_object_type"], "dcim.interface");
        assert_eq!(state["assigned_object_id"], 12);
        let stored = client.get_object(&endpoint::IP_ADDRESSES, 1).unwrap();
        assert_eq!(stored["assigned_object_id"], 12);

        let unbound = testing::update(&addresses, json!({"address": "10.0.0.1/31"}), state).await;
        assert_eq!(unbound["assigned_object_type"], json!(null));
        assert_eq!(unbound["assigned_object_id"], json!(null));
        assert_eq!(client.get_object(&endpoint::IP_ADDRESSES, 1).unwrap()["assigned_object_type"], json!(null));
    }

    #[tokio::test]
    async fn assignment_needs_type_and_id() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let addresses = testing::resource::<IpAddressSpec>(&client);

        let response = addresses
            .create(crate::framework::CreateRequest {
                plan: json!({"address": "10.0.0.1/31", "assigned_object_id": 12}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Incomplete Assignment");
        assert_eq!(diag.attribute.as_deref(), Some("assigned_object_type"));
        assert_eq!(client.count(&endpoint::IP_ADDRESSES), 0);
    }
}
