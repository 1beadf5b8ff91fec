//! `netbox_device_role`

use crate::framework::{Attr, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bool_attribute_with_default, computed_color_attribute, custom_fields_attribute,
    description_attribute, id_attribute, name_attribute, reference_attribute, slug_attribute,
    tags_attribute,
};
use crate::utils::request::{bool_or, description, string_or_empty};
use crate::utils::state::{bool_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, DeviceRole, Endpoint, NetBoxClientTrait, WritableDeviceRoleRequest};
use serde::{Deserialize, Serialize};

/// Color NetBox gives a role created without one
const DEFAULT_COLOR: &str = "9e9e9e";

/// Device role state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRoleModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub color: Attr<String>,
    pub vm_role: Attr<bool>,
    pub config_template: Attr<String>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(DeviceRoleModel);

/// Device role resource definition
#[derive(Debug, Default)]
pub struct DeviceRoleSpec;

/// `netbox_device_role`
pub type DeviceRoleResource = NetBoxResource<DeviceRoleSpec>;

#[async_trait::async_trait]
impl ObjectResource for DeviceRoleSpec {
    type Model = DeviceRoleModel;
    type Object = DeviceRole;
    type Request = WritableDeviceRoleRequest;

    const TYPE_SUFFIX: &'static str = "device_role";
    const ENDPOINT: Endpoint = endpoint::DEVICE_ROLES;

    fn schema(&self) -> Schema {
        Schema::new("Manages a device role in Netbox, the function a device serves (e.g. core switch).")
            .attribute("id", id_attribute("device role"))
            .attribute("name", name_attribute("device role", 100))
            .attribute("slug", slug_attribute("device role"))
            .attribute("color", computed_color_attribute("device role"))
            .attribute(
                "vm_role",
                bool_attribute_with_default(
                    "Whether virtual machines may be assigned to this role. Defaults to true.",
                    true,
                ),
            )
            .attribute(
                "config_template",
                reference_attribute(
                    "config template",
                    "ID or name of the config template devices in this role render by default.",
                ),
            )
            .attribute("description", description_attribute("device role"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &DeviceRoleModel,
    ) -> Result<WritableDeviceRoleRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let config_template = lookup::resolve_optional(
            client,
            &targets::CONFIG_TEMPLATE,
            &model.config_template,
            "config_template",
            &mut diags,
        )
        .await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableDeviceRoleRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            color: model.color.as_str().unwrap_or(DEFAULT_COLOR).to_string(),
            vm_role: bool_or(&model.vm_role, true),
            config_template,
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, role: &DeviceRole, model: &mut DeviceRoleModel) {
        model.name = Attr::Value(role.name.clone());
        model.slug = Attr::Value(role.slug.clone());
        model.color = string_from_api(&role.color, &model.color);
        model.vm_role = bool_from_api(role.vm_role);
        model.config_template = reconcile_reference(&model.config_template, role.config_template.as_ref());
        model.description = string_from_api(&role.description, &model.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{Resource, UNKNOWN};
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<DeviceRoleSpec>(
            "netbox_device_role",
            &["name", "slug"],
            &["color", "vm_role", "config_template", "description", "tags", "custom_fields"],
            &["id", "color", "vm_role"],
        );
    }

    #[tokio::test]
    async fn color_and_vm_role_defaults() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let roles = testing::resource::<DeviceRoleSpec>(&client);

        let state = testing::create(
            &roles,
            json!({"name": "Core Switch", "slug": "core-switch", "color": UNKNOWN}),
        )
        .await;
        assert_eq!(state["color"], DEFAULT_COLOR);
        assert_eq!(state["vm_role"], true);

        let updated = testing::update(
            &roles,
            json!({"name": "Core Switch", "slug": "core-switch", "color": UNKNOWN, "vm_role": false}),
            state,
        )
        .await;
        assert_eq!(updated["color"], DEFAULT_COLOR);
        assert_eq!(updated["vm_role"], false);
    }

    #[test]
    fn color_must_be_hex() {
        let diags = DeviceRoleResource::new().validate_config(&json!({
            "name": "Core", "slug": "core", "color": "#ff0000"
        }));
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid Color");
    }

    #[tokio::test]
    async fn config_template_by_name() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::CONFIG_TEMPLATES, json!({"name": "Leaf baseline"})).unwrap();
        let roles = testing::resource::<DeviceRoleSpec>(&client);

        let state = testing::create(
            &roles,
            json!({"name": "Leaf", "slug": "leaf", "color": UNKNOWN, "config_template": "Leaf baseline"}),
        )
        .await;
        assert_eq!(state["config_template"], "Leaf baseline");
        assert_eq!(client.get_object(&endpoint::DEVICE_ROLES, 2).unwrap()["config_template"]["id"], 1);

        let response = crate::framework::Resource::create(
            &roles,
            crate::framework::CreateRequest {
                plan: json!({"name": "Spine", "slug": "spine", "config_template": "Spine baseline"}),
            },
        )
        .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.attribute.as_deref(), Some("config_template"));
        assert_eq!(client.count(&endpoint::DEVICE_ROLES), 1);
    }
}
