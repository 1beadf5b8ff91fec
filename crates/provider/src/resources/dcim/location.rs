//! `netbox_location`

use super::site::SITE_STATUSES;
use crate::framework::{Attr, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bounded_string_attribute, custom_fields_attribute, description_attribute, id_attribute,
    name_attribute, reference_attribute, required_reference_attribute, slug_attribute,
    status_attribute, tags_attribute,
};
use crate::utils::request::{description, string_or_empty};
use crate::utils::state::{choice_from_api, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Endpoint, Location, NetBoxClientTrait, WritableLocationRequest};
use serde::{Deserialize, Serialize};

/// Location state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub slug: Attr<String>,
    pub site: Attr<String>,
    pub parent: Attr<String>,
    pub status: Attr<String>,
    pub tenant: Attr<String>,
    pub facility: Attr<String>,
    pub description: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(LocationModel);

/// Location resource definition
#[derive(Debug, Default)]
pub struct LocationSpec;

/// `netbox_location`
pub type LocationResource = NetBoxResource<LocationSpec>;

#[async_trait::async_trait]
impl ObjectResource for LocationSpec {
    type Model = LocationModel;
    type Object = Location;
    type Request = WritableLocationRequest;

    const TYPE_SUFFIX: &'static str = "location";
    const ENDPOINT: Endpoint = endpoint::LOCATIONS;

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages a location in Netbox. Locations are subdivisions of a site, such as a \
             building, floor or room, and can be nested.",
        )
        .attribute("id", id_attribute("location"))
        .attribute("name", name_attribute("location", 100))
        .attribute("slug", slug_attribute("location"))
        .attribute(
            "site",
            required_reference_attribute("site", "ID or slug of the site this location belongs to."),
        )
        .attribute("parent", reference_attribute("location", "ID or slug of the parent location."))
        .attribute(
            "status",
            status_attribute(SITE_STATUSES, "active", "Operational status of the location."),
        )
        .attribute("tenant", reference_attribute("tenant", ""))
        .attribute(
            "facility",
            bounded_string_attribute("Local facility identifier or description.", 50),
        )
        .attribute("description", description_attribute("location"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &LocationModel,
    ) -> Result<WritableLocationRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let site = lookup::resolve_required(client, &targets::SITE, &model.site, "site", &mut diags).await;
        let site_id = site.to_string();
        let parent = lookup::resolve_optional_scoped(
            client,
            &targets::LOCATION,
            &model.parent,
            &[("site_id", site_id.as_str())],
            "parent",
            &mut diags,
        )
        .await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }

        Ok(WritableLocationRequest {
            name: string_or_empty(&model.name),
            slug: string_or_empty(&model.slug),
            site,
            parent,
            status: model.status.as_str().unwrap_or("active").to_string(),
            tenant,
            facility: string_or_empty(&model.facility),
            description: description(&model.description),
        })
    }

    fn map_to_state(&self, location: &Location, model: &mut LocationModel) {
        model.name = Attr::Value(location.name.clone());
        model.slug = Attr::Value(location.slug.clone());
        model.site = reconcile_reference(&model.site, location.site.as_ref());
        model.parent = reconcile_reference(&model.parent, location.parent.as_ref());
        model.status = choice_from_api(location.status.as_ref(), &model.status);
        model.tenant = reconcile_reference(&model.tenant, location.tenant.as_ref());
        model.facility = string_from_api(&location.facility, &model.facility);
        model.description = string_from_api(&location.description, &model.description);
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
        assert_contract::<LocationSpec>(
            "netbox_location",
            &["name", "slug", "site"],
            &["parent", "status", "tenant", "facility", "description", "tags", "custom_fields"],
            &["id", "status"],
        );
    }

    #[tokio::test]
    async fn parent_is_looked_up_within_the_site() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::SITES, json!({"name": "Paris", "slug": "paris"})).unwrap();
        client.insert(&endpoint::SITES, json!({"name": "Lyon", "slug": "lyon"})).unwrap();
        client
            .insert(&endpoint::LOCATIONS, json!({"name": "Building A", "slug": "building-a", "site": 2}))
            .unwrap();
        let locations = testing::resource::<LocationSpec>(&client);

        // building-a only exists in Lyon
        let response = locations
            .create(CreateRequest {
                plan: json!({"name": "Floor 1", "slug": "floor-1", "site": "paris", "parent": "building-a"}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Location lookup failed");
        assert_eq!(diag.attribute.as_deref(), Some("parent"));

        let state = testing::create(
            &locations,
            json!({"name": "Floor 1", "slug": "floor-1", "site": "Lyon", "parent": "building-a"}),
        )
        .await;
        assert_eq!(state["site"], "Lyon");
        assert_eq!(state["parent"], "building-a");
        assert_eq!(state["status"], "active");
        assert_eq!(client.get_object(&endpoint::LOCATIONS, 4).unwrap()["parent"]["id"], 3);
    }

    #[tokio::test]
    async fn site_is_required() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let locations = testing::resource::<LocationSpec>(&client);
        let response = locations
            .create(CreateRequest {
                plan: json!({"name": "Floor 1", "slug": "floor-1"}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "Missing Site");
        assert_eq!(diag.attribute.as_deref(), Some("site"));
    }
}
