//! `netbox_l2vpn`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, reference_attribute, required_enum_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_i64, parse_id, string_or_empty};
use crate::utils::state::{choice_from_api, int64_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, BriefRef, Endpoint, L2vpn, NetBoxClientTrait, WritableL2vpnRequest};
use serde::{Deserialize, Serialize};

/// L2VPN service types
pub const L2VPN_TYPES: &[&str] = &[
    "vpws", "vpls", "vxlan", "vxlan-evpn", "mpls-evpn", "pbb-evpn", "evpn-vpws", "epl", "evpl",
    "ep-lan", "evp-lan", "ep-tree", "evp-tree",
];

/// L2VPN state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct L2vpnModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    #[serde(rename = "type")]
    pub l2vpn_type: Attr<String>,
    pub identifier: Attr<i64>,
    pub import_targets: Attr<Vec<String>>,
    pub export_targets: Attr<Vec<String>>,
    pub tenant: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(L2vpnModel);

/// L2VPN resource definition
#[derive(Debug, Default)]
pub struct L2vpnSpec;

/// `netbox_l2vpn`
pub type L2vpnResource = NetBoxResource<L2vpnSpec>;

#[async_trait::async_trait]
impl ObjectResource for L2vpnSpec {
    type Model = L2vpnModel;
    type Object = L2vpn;
    type Request = WritableL2vpnRequest;

    const TYPE_SUFFIX: &'static str = "l2vpn";
    const ENDPOINT: Endpoint = endpoint::L2VPNS;
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a Layer 2 VPN in Netbox, such as a VPLS, VXLAN or EVPN service.",
        )
        .attribute("id", id_attribute("L2VPN"))
        .attribute("name", name_attribute("L2VPN", 100))
        .attribute("slug", slug_attribute("L2VPN"))
        .attribute("type", required_enum_attribute("L2VPN type.", L2VPN_TYPES))
        .attribute(
            "identifier",
            Attribute::optional(AttributeKind::Int64, "Numeric identifier unique to the parent L2VPN."),
        )
        .attribute(
            "import_targets",
            Attribute::optional(AttributeKind::string_set(), "IDs of the route targets to import."),
        )
        .attribute(
            "export_targets",
            Attribute::optional(AttributeKind::string_set(), "IDs of the route targets to export."),
        )
        .attribute("tenant", reference_attribute("tenant", ""))
        .attribute("description", description_attribute("L2VPN"))
        .attribute("comments", comments_attribute("L2VPN"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &L2vpnModel,
    ) -> Result<WritableL2vpnRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        let import_targets = route_target_ids(&model.import_targets, "import_targets", &mut diags);
        let export_targets = route_target_ids(&model.export_targets, "export_targets", &mut diags);
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableL2vpnRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            l2vpn_type: string_or_empty(&model.l2vpn_type),
            identifier: optional_i64(&model.identifier),
            import_targets,
            export_targets,
            tenant,
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, l2vpn: &L2vpn, model: &mut L2vpnModel) {
        model.name = Attr::Value(l2vpn.name.clone());
        model.slug = Attr::Value(l2vpn.slug.clone());
        model.l2vpn_type = choice_from_api(l2vpn.l2vpn_type.as_ref(), &model.l2vpn_type);
        model.identifier = int64_from_api(l2vpn.identifier);
        model.import_targets = route_targets_from_api(&l2vpn.import_targets, &model.import_targets);
        model.export_targets = route_targets_from_api(&l2vpn.export_targets, &model.export_targets);
        model.tenant = reconcile_reference(&model.tenant, l2vpn.tenant.as_ref());
        model.description = string_from_api(&l2vpn.description, &model.description);
        model.comments = string_from_api(&l2vpn.comments, &model.comments);
    }
}

/// Route target ids from a set attribute; unset sends an empty list
fn route_target_ids(value: &Attr<Vec<String>>, attribute: &str, diags: &mut Diagnostics) -> Vec<u64> {
    let mut ids = Vec::new();
    for raw in value.value().into_iter().flatten() {
        match parse_id(raw) {
            Ok(id) => ids.push(id),
            Err(e) => diags.add_attribute_error(attribute, "Invalid Route Target ID", e.to_string()),
        }
    }
    ids
}

fn route_targets_from_api(api: &[BriefRef], current: &Attr<Vec<String>>) -> Attr<Vec<String>> {
    if api.is_empty() && !current.is_known() {
        return Attr::Null;
    }
    Attr::Value(api.iter().map(|target| target.id.to_string()).collect())
}
