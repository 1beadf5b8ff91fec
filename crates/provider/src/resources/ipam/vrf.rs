//! `netbox_vrf`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bool_attribute_with_default, comments_attribute, custom_fields_attribute,
    description_attribute, id_attribute, name_attribute, reference_attribute, tags_attribute,
};
use crate::utils::request::{bool_or, comments, description, optional_choice, string_or_empty};
use crate::utils::state::{bool_from_api, optional_string_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Vrf, WritableVrfRequest};
use serde::{Deserialize, Serialize};

/// VRF state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VrfModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub rd: Attr<String>,
    pub tenant: Attr<String>,
    pub enforce_unique: Attr<bool>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(VrfModel);

/// VRF resource definition
#[derive(Debug, Default)]
pub struct VrfSpec;

/// `netbox_vrf`
pub type VrfResource = NetBoxResource<VrfSpec>;

#[async_trait::async_trait]
impl ObjectResource for VrfSpec {
    type Model = VrfModel;
    type Object = Vrf;
    type Request = WritableVrfRequest;

    const TYPE_SUFFIX: &'static str = "vrf";
    const ENDPOINT: Endpoint = endpoint::VRFS;
    const LOOKUP_FIELD: Option<&'static str> = Some("name");

    fn schema(&self) -> Schema {
        Schema::new("Manages a Virtual Routing and Forwarding (VRF) table in Netbox.")
            .attribute("id", id_attribute("VRF"))
            .attribute("name", name_attribute("VRF", 100))
            .attribute(
                "rd",
                Attribute::optional(
                    AttributeKind::String,
                    "Route distinguisher (RD) as defined in RFC 4364. Format: `ASN:nn` or `IP:nn`.",
                ),
            )
            .attribute("tenant", reference_attribute("tenant", ""))
            .attribute(
                "enforce_unique",
                bool_attribute_with_default(
                    "Prevent duplicate prefixes/IP addresses within this VRF. Defaults to true.",
                    true,
                ),
            )
            .attribute("description", description_attribute("VRF"))
            .attribute("comments", comments_attribute("VRF"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &VrfModel,
    ) -> Result<WritableVrfRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableVrfRequest {
            name: string_or_empty(&model.name),
            // route distinguishers are unique, so an empty one is sent as null
            rd: optional_choice(&model.rd),
            tenant,
            enforce_unique: bool_or(&model.enforce_unique, true),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, vrf: &Vrf, model: &mut VrfModel) {
        model.name = Attr::Value(vrf.name.clone());
        model.rd = optional_string_from_api(vrf.rd.as_deref(), &model.rd);
        model.tenant = reconcile_reference(&model.tenant, vrf.tenant.as_ref());
        model.enforce_unique = bool_from_api(vrf.enforce_unique);
        model.description = string_from_api(&vrf.description, &model.description);
        model.comments = string_from_api(&vrf.comments, &model.comments);
    }
}
