//! `netbox_site`

use crate::framework::{Attr, AttributeKind, Attribute, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bounded_string_attribute, comments_attribute, computed_reference_id_attribute,
    custom_fields_attribute, description_attribute,
    id_attribute, name_attribute, reference_attribute, slug_attribute, status_attribute,
    tags_attribute,
};
use crate::utils::request::{comments, description, optional_f64, optional_string, string_or_empty};
use crate::utils::state::{
    choice_from_api, float64_from_api, optional_string_from_api, reconcile_id_reference,
    reconcile_reference, string_from_api,
};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Endpoint, NetBoxClientTrait, Site, WritableSiteRequest};
use serde::{Deserialize, Serialize};

/// Site lifecycle states
pub const SITE_STATUSES: &[&str] = &["planned", "staging", "active", "decommissioning", "retired"];

/// Site state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub status: Attr<String>,
    pub region: Attr<String>,
    pub group: Attr<String>,
    pub tenant: Attr<String>,
    pub region_id: Attr<String>,
    pub group_id: Attr<String>,
    pub tenant_id: Attr<String>,
    pub facility: Attr<String>,
    pub time_zone: Attr<String>,
    pub physical_address: Attr<String>,
    pub latitude: Attr<f64>,
    pub longitude: Attr<f64>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(SiteModel);

/// Site resource definition
#[derive(Debug, Default)]
pub struct SiteSpec;

/// `netbox_site`
pub type SiteResource = NetBoxResource<SiteSpec>;

#[async_trait::async_trait]
impl ObjectResource for SiteSpec {
    type Model = SiteModel;
    type Object = Site;
    type Request = WritableSiteRequest;

    const TYPE_SUFFIX: &'static str = "site";
    const ENDPOINT: Endpoint = endpoint::SITES;
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a site in Netbox. Sites represent physical locations such as data centers, \
             offices, or other facilities where network infrastructure is deployed.",
        )
        .attribute("id", id_attribute("site"))
        .attribute("name", name_attribute("site", 100))
        .attribute("slug", slug_attribute("site"))
        .attribute(
            "status",
            status_attribute(SITE_STATUSES, "active", "Operational status of the site."),
        )
        .attribute(
            "region",
            reference_attribute("region", "ID or slug of the region where this site is located."),
        )
        .attribute("group", reference_attribute("site group", "ID or slug of the site group."))
        .attribute(
            "tenant",
            reference_attribute("tenant", "ID or slug of the tenant that owns this site."),
        )
        .attribute("region_id", computed_reference_id_attribute("region"))
        .attribute("group_id", computed_reference_id_attribute("site group"))
        .attribute("tenant_id", computed_reference_id_attribute("tenant"))
        .attribute(
            "facility",
            bounded_string_attribute(
                "Local facility identifier or description (e.g., building name, floor, room number).",
                50,
            ),
        )
        .attribute(
            "time_zone",
            Attribute::optional(AttributeKind::String, "IANA time zone of the site (e.g. `Europe/Paris`)."),
        )
        .attribute(
            "physical_address",
            bounded_string_attribute("Physical location of the building.", 200),
        )
        .attribute(
            "latitude",
            Attribute::optional(AttributeKind::Float64, "GPS latitude in decimal format (xx.yyyyyy).")
                .validator(validators::latitude()),
        )
        .attribute(
            "longitude",
            Attribute::optional(AttributeKind::Float64, "GPS longitude in decimal format (xx.yyyyyy).")
                .validator(validators::longitude()),
        )
        .attribute("description", description_attribute("site"))
        .attribute("comments", comments_attribute("site"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &SiteModel,
    ) -> Result<WritableSiteRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let region = lookup::resolve_optional(client, &targets::REGION, &model.region, "region", &mut diags).await;
        let group = lookup::resolve_optional(client, &targets::SITE_GROUP, &model.group, "group", &mut diags).await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }

        Ok(WritableSiteRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            status: model.status.as_str().unwrap_or("active").to_string(),
            region,
            group,
            tenant,
            facility: string_or_empty(&model.facility),
            time_zone: optional_string(&model.time_zone),
            physical_address: string_or_empty(&model.physical_address),
            latitude: optional_f64(&model.latitude),
            longitude: optional_f64(&model.longitude),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, site: &Site, model: &mut SiteModel) {
        model.name = Attr::Value(site.name.clone());
        model.slug = Attr::Value(site.slug.clone());
        model.status = choice_from_api(site.status.as_ref(), &model.status);
        model.region = reconcile_reference(&model.region, site.region.as_ref());
        model.group = reconcile_reference(&model.group, site.group.as_ref());
        model.tenant = reconcile_reference(&model.tenant, site.tenant.as_ref());
        model.region_id = reconcile_id_reference(site.region.as_ref());
        model.group_id = reconcile_id_reference(site.group.as_ref());
        model.tenant_id = reconcile_id_reference(site.tenant.as_ref());
        model.facility = string_from_api(&site.facility, &model.facility);
        model.time_zone = optional_string_from_api(site.time_zone.as_deref(), &model.time_zone);
        model.physical_address = string_from_api(&site.physical_address, &model.physical_address);
        model.latitude = float64_from_api(site.latitude);
        model.longitude = float64_from_api(site.longitude);
        model.description = string_from_api(&site.description, &model.description);
        model.comments = string_from_api(&site.comments, &model.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{CreateRequest, Resource};
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<SiteSpec>(
            "netbox_site",
            &["name", "slug"],
            &[
                "status", "region", "group", "tenant", "facility", "time_zone", "physical_address",
                "latitude", "longitude", "description", "comments", "tags", "custom_fields",
            ],
            &["id", "status", "region_id", "group_id", "tenant_id"],
        );
        assert!(SiteResource::new().identity_schema().is_some());
    }

    #[test]
    fn coordinates_are_validated() {
        let diags = SiteResource::new().validate_config(&json!({
            "name": "Paris", "slug": "paris", "latitude": 91.0, "longitude": -200
        }));
        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Invalid Latitude", "Invalid Longitude"]);
    }

    fn client() -> MockNetBoxClient {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::TENANTS, json!({"name": "ACME Corp", "slug": "acme"}))
            .unwrap();
        client
            .insert(&endpoint::REGIONS, json!({"name": "Europe", "slug": "europe"}))
            .unwrap();
        client
    }

    #[tokio::test]
    async fn references_keep_the_configured_spelling() {
        let client = client();
        let sites = testing::resource::<SiteSpec>(&client);

        let state = testing::create(
            &sites,
            json!({
                "name": "Paris DC1",
                "slug": "paris-dc1",
                "tenant": "ACME Corp",
                "region": "2",
                "latitude": 48.85,
                "custom_fields": [{"name": "owner", "type": "text", "value": "netops"}]
            }),
        )
        .await;
        assert_eq!(state["status"], "active");
        assert_eq!(state["tenant"], "ACME Corp");
        assert_eq!(state["region"], "2");
        assert_eq!(state["latitude"], 48.85);
        assert_eq!(state["group"], json!(null));
        assert_eq!(state["tenant_id"], "1");
        assert_eq!(state["region_id"], "2");
        assert_eq!(state["group_id"], json!(null));
        assert_eq!(state["custom_fields"], json!([{"name": "owner", "type": "text", "value": "netops"}]));

        let stored = client.get_object(&endpoint::SITES, 3).unwrap();
        assert_eq!(stored["tenant"]["id"], 1);
        assert_eq!(stored["custom_fields"]["owner"], "netops");

        let response = testing::read(&sites, state).await;
        testing::assert_ok(&response);
        assert_eq!(response.identity, Some(json!({"id": "3", "custom_fields": ["owner"]})));
        let refreshed = response.state.unwrap();
        assert_eq!(refreshed["tenant"], "ACME Corp");
    }

    #[tokio::test]
    async fn stale_reference_falls_back_to_slug() {
        let client = client();
        let sites = testing::resource::<SiteSpec>(&client);
        let mut state = testing::create(
            &sites,
            json!({"name": "Lyon", "slug": "lyon", "tenant": "acme"}),
        )
        .await;
        state["tenant"] = json!("Old Name");

        let refreshed = testing::read(&sites, state).await.state.unwrap();
        assert_eq!(refreshed["tenant"], "acme");
    }

    #[tokio::test]
    async fn custom_fields_outside_the_configuration_are_kept() {
        let client = client();
        let sites = testing::resource::<SiteSpec>(&client);
        let state = testing::create(
            &sites,
            json!({
                "name": "Lyon",
                "slug": "lyon",
                "custom_fields": [
                    {"name": "owner", "type": "text", "value": "netops"},
                    {"name": "rack_count", "type": "integer", "value": "12"}
                ]
            }),
        )
        .await;

        // drop rack_count from the plan and clear owner
        let updated = testing::update(
            &sites,
            json!({
                "name": "Lyon",
                "slug": "lyon",
                "custom_fields": [{"name": "owner", "type": "text", "value": ""}]
            }),
            state,
        )
        .await;
        assert_eq!(updated["custom_fields"], json!([{"name": "owner", "type": "text", "value": ""}]));

        let stored = client.get_object(&endpoint::SITES, 3).unwrap();
        assert_eq!(stored["custom_fields"]["owner"], json!(null));
        assert_eq!(stored["custom_fields"]["rack_count"], 12);
    }

    #[tokio::test]
    async fn import_with_identity_filters_custom_fields() {
        let client = client();
        client
            .insert(
                &endpoint::SITES,
                json!({
                    "name": "Berlin",
                    "slug": "berlin",
                    "status": "planned",
                    "tenant": 1,
                    "custom_fields": {"owner": "netops", "rack_count": 4, "commissioned": "2021-04-01"}
                }),
            )
            .unwrap();
        let sites = testing::resource::<SiteSpec>(&client);

        let response = testing::import(
            &sites,
            "",
            Some(json!({"id": "3", "custom_fields": ["owner", "commissioned"]})),
        )
        .await;
        testing::assert_ok(&response);
        let state = response.state.unwrap();
        assert_eq!(state["tenant"], "acme");
        assert_eq!(state["status"], "planned");
        assert_eq!(
            state["custom_fields"],
            json!([
                {"name": "commissioned", "type": "date", "value": "2021-04-01"},
                {"name": "owner", "type": "text", "value": "netops"}
            ])
        );
        assert_eq!(
            response.identity,
            Some(json!({"id": "3", "custom_fields": ["commissioned", "owner"]}))
        );
    }

    #[tokio::test]
    async fn import_identity_needs_an_id() {
        let sites = testing::resource::<SiteSpec>(&client());
        let response = testing::import(&sites, "", Some(json!({"custom_fields": ["owner"]}))).await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid import identity");
    }

    #[tokio::test]
    async fn import_by_id_passes_through() {
        let sites = testing::resource::<SiteSpec>(&client());
        let response = testing::import(&sites, "42", None).await;
        testing::assert_ok(&response);
        let state = response.state.unwrap();
        assert_eq!(state["id"], "42");
        assert_eq!(state["name"], json!(null));

        let response = testing::import(&sites, "paris", None).await;
        assert_eq!(response.diagnostics.iter().next().unwrap().summary, "Invalid Import ID");
    }

    #[tokio::test]
    async fn unconfigured_resource_reports_an_error() {
        let response = SiteResource::new()
            .create(CreateRequest {
                plan: json!({"name": "Paris", "slug": "paris"}),
            })
            .await;
        assert_eq!(
            response.diagnostics.iter().next().unwrap().summary,
            "Unconfigured Netbox Client"
        );
    }
}
