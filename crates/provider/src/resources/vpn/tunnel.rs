//! `netbox_tunnel`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, reference_attribute, required_enum_attribute, status_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_i64, string_or_empty};
use crate::utils::state::{choice_from_api, int64_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Tunnel, WritableTunnelRequest};
use serde::{Deserialize, Serialize};

const TUNNEL_STATUSES: &[&str] = &["planned", "active", "disabled"];

/// Tunnel encapsulations
pub const ENCAPSULATIONS: &[&str] = &[
    "ipsec-transport",
    "ipsec-tunnel",
    "ip-ip",
    "gre",
    "wireguard",
    "openvpn",
    "l2tp",
    "pptp",
];

/// Tunnel state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub status: Attr<String>,
    pub group: Attr<String>,
    pub encapsulation: Attr<String>,
    pub ipsec_profile: Attr<String>,
    pub tenant: Attr<String>,
    pub tunnel_id: Attr<i64>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(TunnelModel);

/// Tunnel resource definition
#[derive(Debug, Default)]
pub struct TunnelSpec;

/// `netbox_tunnel`
pub type TunnelResource = NetBoxResource<TunnelSpec>;

#[async_trait::async_trait]
impl ObjectResource for TunnelSpec {
    type Model = TunnelModel;
    type Object = Tunnel;
    type Request = WritableTunnelRequest;

    const TYPE_SUFFIX: &'static str = "tunnel";
    const ENDPOINT: Endpoint = endpoint::TUNNELS;
    const LOOKUP_FIELD: Option<&'static str> = Some("name");

    fn schema(&self) -> Schema {
        Schema::new("Manages a VPN tunnel in Netbox.")
            .attribute("id", id_attribute("tunnel"))
            .attribute("name", name_attribute("tunnel", 100))
            .attribute(
                "status",
                status_attribute(TUNNEL_STATUSES, "active", "Operational status of the tunnel."),
            )
            .attribute(
                "group",
                reference_attribute("tunnel group", "ID or slug of the tunnel group."),
            )
            .attribute(
                "encapsulation",
                required_enum_attribute("Tunnel encapsulation protocol.", ENCAPSULATIONS),
            )
            .attribute(
                "ipsec_profile",
                reference_attribute("IPSec profile", "ID or name of the IPSec profile securing this tunnel."),
            )
            .attribute("tenant", reference_attribute("tenant", ""))
            .attribute(
                "tunnel_id",
                Attribute::optional(AttributeKind::Int64, "Numeric tunnel identifier (e.g. GRE key)."),
            )
            .attribute("description", description_attribute("tunnel"))
            .attribute("comments", comments_attribute("tunnel"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &TunnelModel,
    ) -> Result<WritableTunnelRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let group = lookup::resolve_optional(client, &targets::TUNNEL_GROUP, &model.group, "group", &mut diags).await;
        let ipsec_profile = lookup::resolve_optional(
            client,
            &targets::IPSEC_PROFILE,
            &model.ipsec_profile,
            "ipsec_profile",
            &mut diags,
        )
        .await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableTunnelRequest {
            name: string_or_empty(&model.name),
            status: model.status.as_str().unwrap_or("active").to_string(),
            group,
            encapsulation: string_or_empty(&model.encapsulation),
            ipsec_profile,
            tenant,
            tunnel_id: optional_i64(&model.tunnel_id),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, tunnel: &Tunnel, model: &mut TunnelModel) {
        model.name = Attr::Value(tunnel.name.clone());
        model.status = choice_from_api(tunnel.status.as_ref(), &model.status);
        model.group = reconcile_reference(&model.group, tunnel.group.as_ref());
        model.encapsulation = choice_from_api(tunnel.encapsulation.as_ref(), &model.encapsulation);
        model.ipsec_profile = reconcile_reference(&model.ipsec_profile, tunnel.ipsec_profile.as_ref());
        model.tenant = reconcile_reference(&model.tenant, tunnel.tenant.as_ref());
        model.tunnel_id = int64_from_api(tunnel.tunnel_id);
        model.description = string_from_api(&tunnel.description, &model.description);
        model.comments = string_from_api(&tunnel.comments, &model.comments);
    }
}
