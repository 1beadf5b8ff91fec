//! `netbox_aggregate`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, id_attribute,
    reference_attribute, required_reference_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_choice, string_or_empty};
use crate::utils::state::{optional_string_from_api, reconcile_ip, reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Aggregate, Endpoint, NetBoxClientTrait, WritableAggregateRequest};
use serde::{Deserialize, Serialize};

/// Aggregate state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateModel {
    pub id: Attr<String>,
    pub prefix: Attr<String>,
    pub rir: Attr<String>,
    pub tenant: Attr<String>,
    pub date_added: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(AggregateModel);

/// Aggregate resource definition
#[derive(Debug, Default)]
pub struct AggregateSpec;

/// `netbox_aggregate`
pub type AggregateResource = NetBoxResource<AggregateSpec>;

#[async_trait::async_trait]
impl ObjectResource for AggregateSpec {
    type Model = AggregateModel;
    type Object = Aggregate;
    type Request = WritableAggregateRequest;

    const TYPE_SUFFIX: &'static str = "aggregate";
    const ENDPOINT: Endpoint = endpoint::AGGREGATES;
    const LOOKUP_FIELD: Option<&'static str> = Some("prefix");

    fn schema(&self) -> Schema {
        Schema::new(
            "Manages an aggregate in Netbox. An aggregate is a top-level block of IP space \
             allocated by a Regional Internet Registry.",
        )
        .attribute("id", id_attribute("aggregate"))
        .attribute(
            "prefix",
            Attribute::required(AttributeKind::String, "The aggregate prefix in CIDR notation (e.g., 10.0.0.0/8).")
                .validator(validators::ip_prefix()),
        )
        .attribute(
            "rir",
            required_reference_attribute("RIR", "ID or slug of the Regional Internet Registry. Required."),
        )
        .attribute("tenant", reference_attribute("tenant", ""))
        .attribute(
            "date_added",
            Attribute::optional(AttributeKind::String, "Date the aggregate was added, in YYYY-MM-DD format."),
        )
        .attribute("description", description_attribute("aggregate"))
        .attribute("comments", comments_attribute("aggregate"))
        .attribute("tags", tags_attribute())
        .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &AggregateModel,
    ) -> Result<WritableAggregateRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let rir = lookup::resolve_required(client, &targets::RIR, &model.rir, "rir", &mut diags).await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableAggregateRequest {
            prefix: string_or_empty(&model.prefix),
            rir,
            tenant,
            date_added: optional_choice(&model.date_added),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, aggregate: &Aggregate, model: &mut AggregateModel) {
        model.prefix = reconcile_ip(&model.prefix, &aggregate.prefix);
        model.rir = reconcile_reference(&model.rir, aggregate.rir.as_ref());
        model.tenant = reconcile_reference(&model.tenant, aggregate.tenant.as_ref());
        model.date_added = optional_string_from_api(aggregate.date_added.as_deref(), &model.date_added);
        model.description = string_from_api(&aggregate.description, &model.description);
        model.comments = string_from_api(&aggregate.comments, &model.comments);
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
        assert_contract::<AggregateSpec>(
            "netbox_aggregate",
            &["prefix", "rir"],
            &["tenant", "date_added", "description", "comments", "tags", "custom_fields"],
            &["id"],
        );
    }

    #[test]
    fn prefix_must_be_a_network_address() {
        let diags = AggregateResource::new().validate_config(&json!({"prefix": "10.0.0.1/8", "rir": "ripe"}));
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid Prefix");
    }

    #[tokio::test]
    async fn uppercase_ipv6_aggregate_is_kept() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::RIRS, json!({"name": "RIPE", "slug": "ripe"})).unwrap();
        client
            .insert(&endpoint::AGGREGATES, json!({"prefix": "2a00:1450::/32", "rir": 1}))
            .unwrap();
        let aggregates = testing::resource::<AggregateSpec>(&client);

        let response = testing::read(&aggregates, json!({"id": "2", "prefix": "2A00:1450::/32", "rir": "ripe"})).await;
        testing::assert_ok(&response);
        let state = response.state.unwrap();
        assert_eq!(state["prefix"], "2A00:1450::/32");
        assert_eq!(state["rir"], "ripe");
    }

    #[tokio::test]
    async fn create_and_missing_rir() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::RIRS, json!({"name": "RIPE", "slug": "ripe"})).unwrap();
        let aggregates = testing::resource::<AggregateSpec>(&client);

        let state = testing::create(
            &aggregates,
            json!({"prefix": "185.0.0.0/16", "rir": "RIPE", "date_added": "2020-01-15"}),
        )
        .await;
        assert_eq!(state["prefix"], "185.0.0.0/16");
        assert_eq!(state["rir"], "RIPE");
        assert_eq!(state["date_added"], "2020-01-15");

        let response = aggregates
            .create(CreateRequest {
                plan: json!({"prefix": "10.0.0.0/8", "rir": "arin"}),
            })
            .await;
        let diag = response.diagnostics.iter().next().unwrap();
        assert_eq!(diag.summary, "RIR lookup failed");
        assert_eq!(diag.detail, "No RIR found with slug or name 'arin'");
    }
}
