//! `netbox_tenant`

use crate::framework::{Attr, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, computed_reference_id_attribute, custom_fields_attribute,
    description_attribute, id_attribute, name_attribute, reference_attribute, slug_attribute,
    tags_attribute,
};
use crate::utils::request::{comments, description, string_or_empty};
use crate::utils::state::{reconcile_id_reference, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Tenant, WritableTenantRequest};
use serde::{Deserialize, Serialize};

/// Tenant state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub group: Attr<String>,
    pub group_id: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(TenantModel);

/// Tenant resource definition
#[derive(Debug, Default)]
pub struct TenantSpec;

/// `netbox_tenant`
pub type TenantResource = NetBoxResource<TenantSpec>;

#[async_trait::async_trait]
impl ObjectResource for TenantSpec {
    type Model = TenantModel;
    type Object = Tenant;
    type Request = WritableTenantRequest;

    const TYPE_SUFFIX: &'static str = "tenant";
    const ENDPOINT: Endpoint = endpoint::TENANTS;
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a tenant in Netbox. Tenants represent customers, departments or other \
             groups that own infrastructure.",
        )
        .attribute("id", id_attribute("tenant"))
        .attribute("name", name_attribute("tenant", 100))
        .attribute("slug", slug_attribute("tenant"))
        .attribute(
            "group",
            reference_attribute("tenant group", "ID or slug of the tenant group this tenant belongs to."),
        )
        .attribute("group_id", computed_reference_id_attribute("tenant group"))
        .attribute("description", description_attribute("tenant"))
        .attribute("comments", comments_attribute("tenant"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &TenantModel,
    ) -> Result<WritableTenantRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let group =
            lookup::resolve_optional(client, &targets::TENANT_GROUP, &model.group, "group", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableTenantRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            group,
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, tenant: &Tenant, model: &mut TenantModel) {
        model.name = Attr::Value(tenant.name.clone());
        model.slug = Attr::Value(tenant.slug.clone());
        model.group = reconcile_reference(&model.group, tenant.group.as_ref());
        model.group_id = reconcile_id_reference(tenant.group.as_ref());
        model.description = string_from_api(&tenant.description, &model.description);
        model.comments = string_from_api(&tenant.comments, &model.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<TenantSpec>(
            "netbox_tenant",
            &["name", "slug"],
            &["group", "description", "comments", "tags", "custom_fields"],
            &["id", "group_id"],
        );
    }

    #[tokio::test]
    async fn lifecycle_with_custom_fields() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::TENANT_GROUPS, json!({"name": "Customers", "slug": "customers"}))
            .unwrap();
        let tenants = testing::resource::<TenantSpec>(&client);

        let state = testing::create(
            &tenants,
            json!({
                "name": "ACME Corp",
                "slug": "acme",
                "group": "customers",
                "custom_fields": [
                    {"name": "contract_id", "type": "integer", "value": "1001"},
                    {"name": "regions", "type": "multiselect", "value": "eu, us"}
                ]
            }),
        )
        .await;
        assert_eq!(state["group"], "customers");
        assert_eq!(state["group_id"], "1");
        let stored = client.get_object(&endpoint::TENANTS, 2).unwrap();
        assert_eq!(stored["custom_fields"]["contract_id"], 1001);
        assert_eq!(stored["custom_fields"]["regions"], json!(["eu", "us"]));

        // custom fields dropped from the plan stay on the object
        let updated = testing::update(
            &tenants,
            json!({"name": "ACME Corp", "slug": "acme", "group": "customers"}),
            state,
        )
        .await;
        assert_eq!(updated["custom_fields"], json!(null));
        let stored = client.get_object(&endpoint::TENANTS, 2).unwrap();
        assert_eq!(stored["custom_fields"]["contract_id"], 1001);

        let response = testing::read(&tenants, updated).await;
        assert_eq!(response.identity, Some(json!({"id": "2", "custom_fields": []})));
    }

    #[test]
    fn group_id_is_read_only() {
        use crate::framework::Resource;
        let diags = TenantResource::new()
            .validate_config(&json!({"name": "ACME Corp", "slug": "acme", "group_id": "1"}));
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid Configuration for Read-Only Attribute");
        assert_eq!(diag.attribute.as_deref(), Some("group_id"));
    }
}
