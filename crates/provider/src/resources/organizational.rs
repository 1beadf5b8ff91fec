//! Organizational objects
//!
//! Regions, site groups, tenant groups, contact groups, manufacturers,
//! contact roles and tunnel groups share one shape: `name`,
//! `slug`, `description` and, for the nested ones, a `parent` of the same
//! type. One generic resource covers them all.

use super::engine::{state_model, NetBoxResource, ObjectResource};
use crate::framework::{Attr, Diagnostics, Schema};
use crate::lookup::{self, targets, LookupConfig};
use crate::schema_attrs::{
    custom_fields_attribute, description_attribute, id_attribute, name_attribute,
    reference_attribute, slug_attribute, tags_attribute,
};
use crate::utils::request::{description, string_or_empty};
use crate::utils::state::{reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, OrganizationalObject, WritableOrganizationalRequest};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// One organizational object type
pub trait OrganizationKind: Default + Send + Sync + 'static {
    /// Type name suffix
    const SUFFIX: &'static str;
    /// Collection
    const ENDPOINT: Endpoint;
    /// Lookup for `parent`, for nested types
    const PARENT: Option<LookupConfig> = None;
}

/// State of an organizational object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub parent: Attr<String>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(OrganizationModel);

/// Resource definition for an [`OrganizationKind`]
#[derive(Debug, Default)]
pub struct OrganizationResource<K: OrganizationKind>(PhantomData<K>);

#[async_trait::async_trait]
impl<K: OrganizationKind> ObjectResource for OrganizationResource<K> {
    type Model = OrganizationModel;
    type Object = OrganizationalObject;
    type Request = WritableOrganizationalRequest;

    const TYPE_SUFFIX: &'static str = K::SUFFIX;
    const ENDPOINT: Endpoint = K::ENDPOINT;

    fn schema(&self) -> Schema {
        let label = K::ENDPOINT.label;
        let mut schema = Schema::new(format!("Manages a {} in Netbox.", label))
            .attribute("id", id_attribute(label))
            .attribute("name", name_attribute(label, 100))
            .attribute("slug", slug_attribute(label))
            .attribute("description", description_attribute(label))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute());
        if K::PARENT.is_some() {
            schema = schema.attribute(
                "parent",
                reference_attribute(label, &format!("ID or slug of the parent {}.", label)),
            );
        }
        schema
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &OrganizationModel,
    ) -> Result<WritableOrganizationalRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let parent = match &K::PARENT {
            Some(config) => Some(
                lookup::resolve_optional(client, config, &model.parent, "parent", &mut diags).await,
            ),
            None => None,
        };
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableOrganizationalRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            parent,
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, object: &OrganizationalObject, model: &mut OrganizationModel) {
        model.name = Attr::Value(object.name.clone());
        model.slug = Attr::Value(object.slug.clone());
        model.description = string_from_api(&object.description, &model.description);
        model.parent = if K::PARENT.is_some() {
            reconcile_reference(&model.parent, object.parent.as_ref())
        } else {
            Attr::Null
        };
    }
}

macro_rules! organization_kind {
    ($kind:ident, $alias:ident, $suffix:literal, $endpoint:expr) => {
        organization_kind!($kind, $alias, $suffix, $endpoint, None);
    };
    ($kind:ident, $alias:ident, $suffix:literal, $endpoint:expr, $parent:expr) => {
        #[doc = concat!("`netbox_", $suffix, "`")]
        #[derive(Debug, Default)]
        pub struct $kind;

        impl OrganizationKind for $kind {
            const SUFFIX: &'static str = $suffix;
            const ENDPOINT: Endpoint = $endpoint;
            const PARENT: Option<LookupConfig> = $parent;
        }

        #[doc = concat!("`netbox_", $suffix, "` resource")]
        pub type $alias = NetBoxResource<OrganizationResource<$kind>>;
    };
}

organization_kind!(Region, RegionResource, "region", endpoint::REGIONS, Some(targets::REGION));
organization_kind!(SiteGroup, SiteGroupResource, "site_group", endpoint::SITE_GROUPS, Some(targets::SITE_GROUP));
organization_kind!(TenantGroup, TenantGroupResource, "tenant_group", endpoint::TENANT_GROUPS, Some(targets::TENANT_GROUP));
organization_kind!(ContactGroup, ContactGroupResource, "contact_group", endpoint::CONTACT_GROUPS, Some(targets::CONTACT_GROUP));
organization_kind!(Manufacturer, ManufacturerResource, "manufacturer", endpoint::MANUFACTURERS);
organization_kind!(ContactRole, ContactRoleResource, "contact_role", endpoint::CONTACT_ROLES);
organization_kind!(TunnelGroup, TunnelGroupResource, "tunnel_group", endpoint::TUNNEL_GROUPS);
