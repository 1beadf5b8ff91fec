//! `netbox_device_type`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bool_attribute_with_default, bounded_string_attribute, comments_attribute,
    custom_fields_attribute, description_attribute, enum_attribute, id_attribute, model_attribute,
    reference_attribute, required_reference_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{bool_or, comments, description, optional_choice, optional_f64, string_or_empty};
use crate::utils::state::{bool_from_api, choice_from_api, float64_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, DeviceType, Endpoint, NetBoxClientTrait, WritableDeviceTypeRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Airflow directions shared by device types and devices
pub const AIRFLOWS: &[&str] = &[
    "front-to-rear",
    "rear-to-front",
    "left-to-right",
    "right-to-left",
    "side-to-rear",
    "passive",
    "mixed",
];

const SUBDEVICE_ROLES: &[&str] = &["parent", "child"];
const WEIGHT_UNITS: &[&str] = &["kg", "g", "lb", "oz"];
const DEFAULT_U_HEIGHT: f64 = 1.0;

/// Device type state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTypeModel {
    pub id: Attr<String>,
    pub manufacturer: Attr<String>,
    pub model: Attr<String>,
    pub slug: Attr<String>,
    pub default_platform: Attr<String>,
    pub part_number: Attr<String>,
    pub u_height: Attr<f64>,
    pub exclude_from_utilization: Attr<bool>,
    pub is_full_depth: Attr<bool>,
    pub subdevice_role: Attr<String>,
    pub airflow: Attr<String>,
    pub weight: Attr<f64>,
    pub weight_unit: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(DeviceTypeModel);

/// Device type resource definition
#[derive(Debug, Default)]
pub struct DeviceTypeSpec;

/// `netbox_device_type`
pub type DeviceTypeResource = NetBoxResource<DeviceTypeSpec>;

#[async_trait::async_trait]
impl ObjectResource for DeviceTypeSpec {
    type Model = DeviceTypeModel;
    type Object = DeviceType;
    type Request = WritableDeviceTypeRequest;

    const TYPE_SUFFIX: &'static str = "device_type";
    const ENDPOINT: Endpoint = endpoint::DEVICE_TYPES;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a device type in Netbox. A device type is a particular make and model of \
             hardware, used as a template for devices.",
        )
        .attribute("id", id_attribute("device type"))
        .attribute(
            "manufacturer",
            required_reference_attribute("manufacturer", "ID or slug of the manufacturer of this device type. Required."),
        )
        .attribute("model", model_attribute("device type", 100))
        .attribute("slug", slug_attribute("device type"))
        .attribute(
            "default_platform",
            reference_attribute("platform", "ID or slug of the default platform for devices of this type."),
        )
        .attribute(
            "part_number",
            bounded_string_attribute("Discrete part number (optional).", 50),
        )
        .attribute(
            "u_height",
            Attribute::optional(
                AttributeKind::Float64,
                "Height of the device in rack units (U). Defaults to 1.0. Use 0 for devices that \
                 don't consume rack space.",
            )
            .default_value(json!(DEFAULT_U_HEIGHT)),
        )
        .attribute(
            "exclude_from_utilization",
            bool_attribute_with_default(
                "If true, devices of this type are excluded when calculating rack utilization. Defaults to false.",
                false,
            ),
        )
        .attribute(
            "is_full_depth",
            bool_attribute_with_default(
                "If true, device consumes both front and rear rack faces. Defaults to true.",
                true,
            ),
        )
        .attribute(
            "subdevice_role",
            enum_attribute(
                "Parent devices house child devices in device bays. Leave blank if this device \
                 type is neither a parent nor a child.",
                SUBDEVICE_ROLES,
            ),
        )
        .attribute("airflow", enum_attribute("Direction of airflow.", AIRFLOWS))
        .attribute(
            "weight",
            Attribute::optional(AttributeKind::Float64, "Weight of the device type.")
                .validator(validators::float_at_least(0.0)),
        )
        .attribute("weight_unit", enum_attribute("Unit for the weight.", WEIGHT_UNITS))
        .attribute("description", description_attribute("device type"))
        .attribute("comments", comments_attribute("device type"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &DeviceTypeModel,
    ) -> Result<WritableDeviceTypeRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let manufacturer = lookup::resolve_required(
            client,
            &targets::MANUFACTURER,
            &model.manufacturer,
            "manufacturer",
            &mut diags,
        )
        .await;
        let default_platform = lookup::resolve_optional(
            client,
            &targets::PLATFORM,
            &model.default_platform,
            "default_platform",
            &mut diags,
        )
        .await;
        if diags.has_error() {
            return Err(diags);
        }

        Ok(WritableDeviceTypeRequest {
            manufacturer,
            default_platform,
            model: string_or_empty(&model.model),
            slug: string_or_empty(&model.slug),
            part_number: string_or_empty(&model.part_number),
            // a null height goes back to NetBox's default
            u_height: optional_f64(&model.u_height).unwrap_or(DEFAULT_U_HEIGHT),
            exclude_from_utilization: bool_or(&model.exclude_from_utilization, false),
            is_full_depth: bool_or(&model.is_full_depth, true),
            subdevice_role: optional_choice(&model.subdevice_role),
            airflow: optional_choice(&model.airflow),
            weight: optional_f64(&model.weight),
            weight_unit: optional_choice(&model.weight_unit),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, device_type: &DeviceType, model: &mut DeviceTypeModel) {
        model.manufacturer = reconcile_reference(&model.manufacturer, device_type.manufacturer.as_ref());
        model.model = Attr::Value(device_type.model.clone());
        model.slug = Attr::Value(device_type.slug.clone());
        model.default_platform =
            reconcile_reference(&model.default_platform, device_type.default_platform.as_ref());
        model.part_number = string_from_api(&device_type.part_number, &model.part_number);
        model.u_height = Attr::Value(device_type.u_height);
        model.exclude_from_utilization = bool_from_api(device_type.exclude_from_utilization);
        model.is_full_depth = bool_from_api(device_type.is_full_depth);
        model.subdevice_role = choice_from_api(device_type.subdevice_role.as_ref(), &model.subdevice_role);
        model.airflow = choice_from_api(device_type.airflow.as_ref(), &model.airflow);
        model.weight = float64_from_api(device_type.weight);
        model.weight_unit = choice_from_api(device_type.weight_unit.as_ref(), &model.weight_unit);
        model.description = string_from_api(&device_type.description, &model.description);
        model.comments = string_from_api(&device_type.comments, &model.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Resource;
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;

    #[test]
    fn contract() {
        assert_contract::<DeviceTypeSpec>(
            "netbox_device_type",
            &["manufacturer", "model", "slug"],
            &[
                "default_platform", "part_number", "u_height", "exclude_from_utilization",
                "is_full_depth", "subdevice_role", "airflow", "weight", "weight_unit",
                "description", "comments", "tags", "custom_fields",
            ],
            &["id", "u_height", "exclude_from_utilization", "is_full_depth"],
        );
    }

    #[test]
    fn enums_accept_empty_to_clear() {
        let resource = DeviceTypeResource::new();
        let base = json!({"manufacturer": "arista", "model": "7050", "slug": "7050"});
        let mut config = base.clone();
        config["airflow"] = json!("");
        config["subdevice_role"] = json!("parent");
        assert!(resource.validate_config(&config).is_empty());

        let mut config = base;
        config["weight_unit"] = json!("stone");
        config["weight"] = json!(-1.5);
        let summaries: Vec<_> = resource
            .validate_config(&config)
            .iter()
            .map(|d| d.summary.clone())
            .collect();
        assert_eq!(summaries.len(), 2);
    }

    #[tokio::test]
    async fn defaults_and_choices() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::MANUFACTURERS, json!({"name": "Arista", "slug": "arista"}))
            .unwrap();
        let device_types = testing::resource::<DeviceTypeSpec>(&client);

        let state = testing::create(
            &device_types,
            json!({
                "manufacturer": "Arista",
                "model": "DCS-7050SX3",
                "slug": "dcs-7050sx3",
                "airflow": "front-to-rear",
                "weight": 9.5,
                "weight_unit": "kg"
            }),
        )
        .await;
        assert_eq!(state["manufacturer"], "Arista");
        assert_eq!(state["u_height"], 1.0);
        assert_eq!(state["is_full_depth"], true);
        assert_eq!(state["exclude_from_utilization"], false);
        assert_eq!(state["airflow"], "front-to-rear");
        assert_eq!(state["subdevice_role"], json!(null));
        assert_eq!(state["weight_unit"], "kg");

        let stored = client.get_object(&endpoint::DEVICE_TYPES, 2).unwrap();
        assert_eq!(stored["airflow"]["value"], "front-to-rear");
        assert_eq!(stored["subdevice_role"], json!(null));

        let updated = testing::update(
            &device_types,
            json!({
                "manufacturer": "arista",
                "model": "DCS-7050SX3",
                "slug": "dcs-7050sx3",
                "u_height": 2.0,
                "airflow": ""
            }),
            state,
        )
        .await;
        assert_eq!(updated["manufacturer"], "arista");
        assert_eq!(updated["u_height"], 2.0);
        assert_eq!(updated["airflow"], "");
        assert_eq!(updated["weight"], json!(null));
    }
}
