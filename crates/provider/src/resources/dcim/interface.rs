//! `netbox_interface`
//!
//! Related interfaces (`parent`, `bridge`, `lag`) are looked up by name
//! within the same device.

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bool_attribute_with_default, bounded_string_attribute, custom_fields_attribute,
    description_attribute, enum_attribute, id_attribute, name_attribute, reference_attribute,
    required_reference_attribute, tags_attribute,
};
use crate::utils::request::{bool_or, description, optional_choice, optional_int32, string_or_empty};
use crate::utils::state::{
    bool_from_api, choice_from_api, int64_from_api, optional_string_from_api, reconcile_reference,
    string_from_api,
};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, Interface, NetBoxClientTrait, WritableInterfaceRequest};
use serde::{Deserialize, Serialize};

const DUPLEX_MODES: &[&str] = &["half", "full", "auto"];
const VLAN_MODES: &[&str] = &["access", "tagged", "tagged-all"];

/// Interface state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceModel {
    pub id: Attr<String>,
    pub device: Attr<String>,
    pub name: Attr<String>,
    pub label: Attr<String>,
    #[serde(rename = "type")]
    pub interface_type: Attr<String>,
    pub enabled: Attr<bool>,
    pub parent: Attr<String>,
    pub bridge: Attr<String>,
    pub lag: Attr<String>,
    pub mtu: Attr<i64>,
    pub mac_address: Attr<String>,
    pub speed: Attr<i64>,
    pub duplex: Attr<String>,
    pub wwn: Attr<String>,
    pub mgmt_only: Attr<bool>,
    pub mode: Attr<String>,
    pub mark_connected: Attr<bool>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(InterfaceModel);

/// Interface resource definition
#[derive(Debug, Default)]
pub struct InterfaceSpec;

/// `netbox_interface`
pub type InterfaceResource = NetBoxResource<InterfaceSpec>;

#[async_trait::async_trait]
impl ObjectResource for InterfaceSpec {
    type Model = InterfaceModel;
    type Object = Interface;
    type Request = WritableInterfaceRequest;

    const TYPE_SUFFIX: &'static str = "interface";
    const ENDPOINT: Endpoint = endpoint::INTERFACES;
    const LOOKUP_FIELD: Option<&'static str> = Some("name");
    const LOOKUP_SCOPE: &'static [(&'static str, &'static str)] = &[("device_id", "device")];
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new("Manages a device interface in Netbox.")
            .attribute("id", id_attribute("interface"))
            .attribute(
                "device",
                required_reference_attribute("device", "ID or name of the device this interface belongs to. Required."),
            )
            .attribute("name", name_attribute("interface", 64))
            .attribute("label", bounded_string_attribute("Physical label on the interface.", 64))
            .attribute(
                "type",
                Attribute::required(
                    AttributeKind::String,
                    "Type of interface. Common values: `virtual`, `bridge`, `lag`, `1000base-t`, \
                     `10gbase-t`, `10gbase-x-sfpp`, `25gbase-x-sfp28`, `40gbase-x-qsfpp`, \
                     `100gbase-x-qsfp28`. Required.",
                ),
            )
            .attribute(
                "enabled",
                bool_attribute_with_default("Whether the interface is enabled. Defaults to `true`.", true),
            )
            .attribute(
                "parent",
                reference_attribute("parent interface", "ID or name of the parent interface (for sub-interfaces)."),
            )
            .attribute(
                "bridge",
                reference_attribute("bridge interface", "ID or name of the bridge interface this interface belongs to."),
            )
            .attribute(
                "lag",
                reference_attribute("LAG interface", "ID or name of the LAG this interface is a member of."),
            )
            .attribute(
                "mtu",
                Attribute::optional(AttributeKind::Int64, "Maximum transmission unit (MTU) size.")
                    .validator(validators::int_between(1, 65536)),
            )
            .attribute(
                "mac_address",
                Attribute::optional(
                    AttributeKind::String,
                    "MAC address of the interface in format `AA:BB:CC:DD:EE:FF`.",
                )
                .validator(validators::mac_address()),
            )
            .attribute(
                "speed",
                Attribute::optional(AttributeKind::Int64, "Interface speed in Kbps.")
                    .validator(validators::float_at_least(0.0)),
            )
            .attribute("duplex", enum_attribute("Duplex mode.", DUPLEX_MODES))
            .attribute(
                "wwn",
                Attribute::optional(AttributeKind::String, "World Wide Name (WWN) for Fibre Channel interfaces."),
            )
            .attribute(
                "mgmt_only",
                bool_attribute_with_default("This interface is used only for out-of-band management.", false),
            )
            .attribute("mode", enum_attribute("802.1Q mode.", VLAN_MODES))
            .attribute(
                "mark_connected",
                bool_attribute_with_default(
                    "Treat as if a cable is connected, even if no cable is attached.",
                    false,
                ),
            )
            .attribute("description", description_attribute("interface"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &InterfaceModel,
    ) -> Result<WritableInterfaceRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let device = lookup::resolve_required(client, &targets::DEVICE, &model.device, "device", &mut diags).await;
        let device_id = device.to_string();
        let scope = [("device_id", device_id.as_str())];
        let parent = lookup::resolve_optional_scoped(
            client,
            &targets::INTERFACE,
            &model.parent,
            &scope,
            "parent",
            &mut diags,
        )
        .await;
        let bridge = lookup::resolve_optional_scoped(
            client,
            &targets::INTERFACE,
            &model.bridge,
            &scope,
            "bridge",
            &mut diags,
        )
        .await;
        let lag =
            lookup::resolve_optional_scoped(client, &targets::INTERFACE, &model.lag, &scope, "lag", &mut diags)
                .await;
        let mtu = optional_int32(&model.mtu, "mtu", &mut diags);
        let speed = optional_int32(&model.speed, "speed", &mut diags);
        if diags.has_error() {
            return Err(diags);
        }

        Ok(WritableInterfaceRequest {
            device,
            name: string_or_empty(&model.name),
            label: string_or_empty(&model.label),
            interface_type: string_or_empty(&model.interface_type),
            enabled: bool_or(&model.enabled, true),
            parent,
            bridge,
            lag,
            mtu,
            mac_address: optional_choice(&model.mac_address),
            speed,
            duplex: optional_choice(&model.duplex),
            wwn: optional_choice(&model.wwn),
            mgmt_only: bool_or(&model.mgmt_only, false),
            mode: optional_choice(&model.mode),
            mark_connected: bool_or(&model.mark_connected, false),
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, interface: &Interface, model: &mut InterfaceModel) {
        model.device = reconcile_reference(&model.device, interface.device.as_ref());
        model.name = Attr::Value(interface.name.clone());
        model.label = string_from_api(&interface.label, &model.label);
        model.interface_type = choice_from_api(interface.interface_type.as_ref(), &model.interface_type);
        model.enabled = bool_from_api(interface.enabled);
        model.parent = reconcile_reference(&model.parent, interface.parent.as_ref());
        model.bridge = reconcile_reference(&model.bridge, interface.bridge.as_ref());
        model.lag = reconcile_reference(&model.lag, interface.lag.as_ref());
        model.mtu = int64_from_api(interface.mtu);
        model.mac_address = optional_string_from_api(interface.mac_address.as_deref(), &model.mac_address);
        model.speed = int64_from_api(interface.speed);
        model.duplex = choice_from_api(interface.duplex.as_ref(), &model.duplex);
        model.wwn = optional_string_from_api(interface.wwn.as_deref(), &model.wwn);
        model.mgmt_only = bool_from_api(interface.mgmt_only);
        model.mode = choice_from_api(interface.mode.as_ref(), &model.mode);
        model.mark_connected = bool_from_api(interface.mark_connected);
        model.description = string_from_api(&interface.description, &model.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{CreateRequest, Resource};
    use crate::resources::dcim::device::tests::fixture;
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::{json, Value};

    #[test]
    fn contract() {
        assert_contract::<InterfaceSpec>(
            "netbox_interface",
            &["device", "name", "type"],
            &[
                "label", "enabled", "parent", "bridge", "lag", "mtu", "mac_address", "speed",
                "duplex", "wwn", "mgmt_only", "mode", "mark_connected", "description", "tags",
                "custom_fields",
            ],
            &["id", "enabled", "mgmt_only", "mark_connected"],
        );
    }

    /// Two devices, each with an `ae0` LAG
    fn two_devices() -> MockNetBoxClient {
        let client = fixture();
        for name in ["leaf01", "leaf02"] {
            client
                .insert(
                    &endpoint::DEVICES,
                    json!({"name": name, "device_type": 3, "role": 4, "site": 1, "status": "active"}),
                )
                .unwrap();
        }
        // leaf01 = 5, leaf02 = 6
        client
            .insert(&endpoint::INTERFACES, json!({"device": 5, "name": "ae0", "type": "lag"}))
            .unwrap();
        client
            .insert(&endpoint::INTERFACES, json!({"device": 6, "name": "ae0", "type": "lag"}))
            .unwrap();
        client
    }

    fn plan(device: &str) -> Value {
        json!({
            "device": device,
            "name": "et-0/0/1",
            "type": "10gbase-x-sfpp",
            "lag": "ae0",
            "mtu": 9216,
            "mode": "tagged"
        })
    }

    #[tokio::test]
    async fn lag_resolves_on_the_same_device() {
        let client = two_devices();
        let interfaces = testing::resource::<InterfaceSpec>(&client);

        let state = testing::create(&interfaces, plan("leaf02")).await;
        assert_eq!(state["device"], "leaf02");
        assert_eq!(state["lag"], "ae0");
        assert_eq!(state["type"], "10gbase-x-sfpp");
        assert_eq!(state["enabled"], true);
        assert_eq!(state["mgmt_only"], false);
        assert_eq!(state["mtu"], 9216);
        assert_eq!(state["mode"], "tagged");
        assert_eq!(state["duplex"], json!(null));

        let stored = client.get_object(&endpoint::INTERFACES, 9).unwrap();
        assert_eq!(stored["lag"]["id"], 8);
        assert_eq!(stored["type"]["value"], "10gbase-x-sfpp");
    }

    #[tokio::test]
    async fn duplicate_name_hint_names_the_interface_on_the_same_device() {
        let client = two_devices();
        let interfaces = testing::resource::<InterfaceSpec>(&client);

        let response = interfaces
            .create(CreateRequest {
                plan: json!({"device": "leaf02", "name": "ae0", "type": "lag"}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Duplicate netbox_interface");
        assert_eq!(diag.attribute.as_deref(), Some("name"));
        // leaf01's ae0 is 7, leaf02's is 8
        assert!(diag.detail.contains("terraform import netbox_interface.ae0 8\n"), "{}", diag.detail);
        assert_eq!(client.count(&endpoint::INTERFACES), 2);
    }

    #[tokio::test]
    async fn mtu_overflow_is_reported_before_any_call() {
        let client = two_devices();
        let interfaces = testing::resource::<InterfaceSpec>(&client);
        let mut plan = plan("leaf01");
        plan["mtu"] = json!(4_294_967_296_i64);

        let response = interfaces.create(CreateRequest { plan }).await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid Integer Value");
        assert_eq!(diag.attribute.as_deref(), Some("mtu"));
        assert_eq!(client.count(&endpoint::INTERFACES), 2);
    }

    #[tokio::test]
    async fn identity_import_keeps_listed_custom_fields() {
        let client = two_devices();
        client
            .insert(
                &endpoint::INTERFACES,
                json!({
                    "device": 5,
                    "name": "mgmt0",
                    "type": "1000base-t",
                    "mgmt_only": true,
                    "enabled": true,
                    "custom_fields": {"circuit_ref": "CID-42", "monitored": true, "notes": null}
                }),
            )
            .unwrap();
        let interfaces = testing::resource::<InterfaceSpec>(&client);

        let response = testing::import(
            &interfaces,
            "",
            Some(json!({"id": "9", "custom_fields": ["monitored", "notes"]})),
        )
        .await;
        testing::assert_ok(&response);
        let state = response.state.unwrap();
        assert_eq!(state["device"], "leaf01");
        assert_eq!(state["mgmt_only"], true);
        assert_eq!(
            state["custom_fields"],
            json!([{"name": "monitored", "type": "boolean", "value": "true"}])
        );
        assert_eq!(
            response.identity,
            Some(json!({"id": "9", "custom_fields": ["monitored"]}))
        );
    }
}
