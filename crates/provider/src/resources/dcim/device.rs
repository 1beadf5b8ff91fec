//! `netbox_device`

use super::device_type::AIRFLOWS;
use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bounded_string_attribute, comments_attribute, custom_fields_attribute, description_attribute,
    enum_attribute, id_attribute, optional_name_attribute, reference_attribute,
    required_reference_attribute, status_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_choice, optional_f64, optional_string, string_or_empty};
use crate::utils::state::{
    choice_from_api, float64_from_api, optional_string_from_api, reconcile_reference, string_from_api,
};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Device, Endpoint, NetBoxClientTrait, WritableDeviceRequest};
use serde::{Deserialize, Serialize};

/// Device lifecycle states
pub const DEVICE_STATUSES: &[&str] = &[
    "offline",
    "active",
    "planned",
    "staged",
    "failed",
    "inventory",
    "decommissioning",
];

/// Device state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub device_type: Attr<String>,
    pub role: Attr<String>,
    pub tenant: Attr<String>,
    pub platform: Attr<String>,
    pub serial: Attr<String>,
    pub asset_tag: Attr<String>,
    pub site: Attr<String>,
    pub location: Attr<String>,
    pub latitude: Attr<f64>,
    pub longitude: Attr<f64>,
    pub status: Attr<String>,
    pub airflow: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(DeviceModel);

/// Device resource definition
#[derive(Debug, Default)]
pub struct DeviceSpec;

/// `netbox_device`
pub type DeviceResource = NetBoxResource<DeviceSpec>;

#[async_trait::async_trait]
impl ObjectResource for DeviceSpec {
    type Model = DeviceModel;
    type Object = Device;
    type Request = WritableDeviceRequest;

    const TYPE_SUFFIX: &'static str = "device";
    const ENDPOINT: Endpoint = endpoint::DEVICES;
    const LOOKUP_FIELD: Option<&'static str> = Some("name");
    const LOOKUP_SCOPE: &'static [(&'static str, &'static str)] = &[("site_id", "site"), ("tenant_id", "tenant")];
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a device in Netbox. A device is a piece of hardware installed at a site, \
             such as a router, switch or server.",
        )
        .attribute("id", id_attribute("device"))
        .attribute("name", optional_name_attribute("device", 64))
        .attribute(
            "device_type",
            required_reference_attribute("device type", "ID or slug of the device type for this device. Required."),
        )
        .attribute(
            "role",
            required_reference_attribute("device role", "ID or slug of the device role. Required."),
        )
        .attribute(
            "tenant",
            reference_attribute("tenant", "ID or slug of the tenant that owns this device."),
        )
        .attribute(
            "platform",
            reference_attribute(
                "platform",
                "ID or slug of the platform (operating system/software) running on this device.",
            ),
        )
        .attribute("serial", bounded_string_attribute("Chassis serial number.", 50))
        .attribute(
            "asset_tag",
            bounded_string_attribute("A unique tag used to identify this device.", 50),
        )
        .attribute(
            "site",
            required_reference_attribute("site", "ID or slug of the site where this device is located. Required."),
        )
        .attribute(
            "location",
            reference_attribute(
                "location",
                "ID or slug of the location within the site where this device is installed.",
            ),
        )
        .attribute(
            "latitude",
            Attribute::optional(AttributeKind::Float64, "GPS latitude coordinate in decimal format (xx.yyyyyy).")
                .validator(validators::latitude()),
        )
        .attribute(
            "longitude",
            Attribute::optional(AttributeKind::Float64, "GPS longitude coordinate in decimal format (xx.yyyyyy).")
                .validator(validators::longitude()),
        )
        .attribute(
            "status",
            status_attribute(DEVICE_STATUSES, "active", "Operational status of the device."),
        )
        .attribute("airflow", enum_attribute("Direction of airflow through the device.", AIRFLOWS))
        .attribute("description", description_attribute("device"))
        .attribute("comments", comments_attribute("device"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &DeviceModel,
    ) -> Result<WritableDeviceRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let device_type = lookup::resolve_required(
            client,
            &targets::DEVICE_TYPE,
            &model.device_type,
            "device_type",
            &mut diags,
        )
        .await;
        let role = lookup::resolve_required(client, &targets::DEVICE_ROLE, &model.role, "role", &mut diags).await;
        let site = lookup::resolve_required(client, &targets::SITE, &model.site, "site", &mut diags).await;
        let site_id = site.to_string();
        let location = lookup::resolve_optional_scoped(
            client,
            &targets::LOCATION,
            &model.location,
            &[("site_id", site_id.as_str())],
            "location",
            &mut diags,
        )
        .await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        let platform =
            lookup::resolve_optional(client, &targets::PLATFORM, &model.platform, "platform", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }

        Ok(WritableDeviceRequest {
            name: optional_string(&model.name),
            device_type,
            role,
            tenant,
            platform,
            serial: string_or_empty(&model.serial),
            // asset tags are unique, so an empty one must be sent as null
            asset_tag: optional_choice(&model.asset_tag),
            site,
            location,
            latitude: optional_f64(&model.latitude),
            longitude: optional_f64(&model.longitude),
            status: model.status.as_str().unwrap_or("active").to_string(),
            airflow: optional_choice(&model.airflow),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, device: &Device, model: &mut DeviceModel) {
        model.name = optional_string_from_api(device.name.as_deref(), &model.name);
        model.device_type = reconcile_reference(&model.device_type, device.device_type.as_ref());
        model.role = reconcile_reference(&model.role, device.role.as_ref());
        model.tenant = reconcile_reference(&model.tenant, device.tenant.as_ref());
        model.platform = reconcile_reference(&model.platform, device.platform.as_ref());
        model.serial = string_from_api(&device.serial, &model.serial);
        model.asset_tag = optional_string_from_api(device.asset_tag.as_deref(), &model.asset_tag);
        model.site = reconcile_reference(&model.site, device.site.as_ref());
        model.location = reconcile_reference(&model.location, device.location.as_ref());
        model.latitude = float64_from_api(device.latitude);
        model.longitude = float64_from_api(device.longitude);
        model.status = choice_from_api(device.status.as_ref(), &model.status);
        model.airflow = choice_from_api(device.airflow.as_ref(), &model.airflow);
        model.description = string_from_api(&device.description, &model.description);
        model.comments = string_from_api(&device.comments, &model.comments);
    }
}
