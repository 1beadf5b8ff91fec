//! `netbox_circuit`

use crate::framework::{Attr, Attribute, AttributeKind, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    comments_attribute, custom_fields_attribute, description_attribute, id_attribute,
    reference_attribute, required_reference_attribute, status_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, optional_choice, optional_int32, string_or_empty};
use crate::utils::state::{
    choice_from_api, int64_from_api, optional_string_from_api, reconcile_reference, string_from_api,
};
use crate::utils::CustomFieldModel;
use crate::validators;
use netbox_client::{endpoint, Circuit, Endpoint, NetBoxClientTrait, WritableCircuitRequest};
use serde::{Deserialize, Serialize};

/// Circuit lifecycle states
pub const CIRCUIT_STATUSES: &[&str] = &[
    "planned",
    "provisioning",
    "active",
    "offline",
    "deprovisioning",
    "decommissioned",
];

/// Circuit state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitModel {
    pub id: Attr<String>,
    pub cid: Attr<String>,
    pub circuit_provider: Attr<String>,
    #[serde(rename = "type")]
    pub circuit_type: Attr<String>,
    pub status: Attr<String>,
    pub tenant: Attr<String>,
    pub install_date: Attr<String>,
    pub termination_date: Attr<String>,
    pub commit_rate: Attr<i64>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(CircuitModel);

/// Circuit resource definition
#[derive(Debug, Default)]
pub struct CircuitSpec;

/// `netbox_circuit`
pub type CircuitResource = NetBoxResource<CircuitSpec>;

#[async_trait::async_trait]
impl ObjectResource for CircuitSpec {
    type Model = CircuitModel;
    type Object = Circuit;
    type Request = WritableCircuitRequest;

    const TYPE_SUFFIX: &'static str = "circuit";
    const ENDPOINT: Endpoint = endpoint::CIRCUITS;
    const LOOKUP_FIELD: Option<&'static str> = Some("cid");
    const IMPORT_IDENTITY: bool = true;

    fn schema(&self) -> Schema {
        Schema::new("Manages a circuit in Netbox, a physical or virtual link delivered by a provider.")
            .attribute("id", id_attribute("circuit"))
            .attribute(
                "cid",
                Attribute::required(AttributeKind::String, "Unique circuit ID assigned by the provider.")
                    .validator(validators::length_between(1, 100)),
            )
            .attribute(
                "circuit_provider",
                required_reference_attribute("provider", "ID or slug of the circuit provider."),
            )
            .attribute(
                "type",
                required_reference_attribute("circuit type", "ID or slug of the circuit type."),
            )
            .attribute(
                "status",
                status_attribute(CIRCUIT_STATUSES, "active", "Operational status of the circuit."),
            )
            .attribute("tenant", reference_attribute("tenant", ""))
            .attribute(
                "install_date",
                Attribute::optional(AttributeKind::String, "Date the circuit was installed (YYYY-MM-DD)."),
            )
            .attribute(
                "termination_date",
                Attribute::optional(AttributeKind::String, "Date the circuit terminates (YYYY-MM-DD)."),
            )
            .attribute(
                "commit_rate",
                Attribute::optional(AttributeKind::Int64, "Committed rate in Kbps.")
                    .validator(validators::int_between(0, i64::from(i32::MAX))),
            )
            .attribute("description", description_attribute("circuit"))
            .attribute("comments", comments_attribute("circuit"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &CircuitModel,
    ) -> Result<WritableCircuitRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let provider = lookup::resolve_required(
            client,
            &targets::CIRCUIT_PROVIDER,
            &model.circuit_provider,
            "circuit_provider",
            &mut diags,
        )
        .await;
        let circuit_type =
            lookup::resolve_required(client, &targets::CIRCUIT_TYPE, &model.circuit_type, "type", &mut diags).await;
        let tenant = lookup::resolve_optional(client, &targets::TENANT, &model.tenant, "tenant", &mut diags).await;
        let commit_rate = optional_int32(&model.commit_rate, "commit_rate", &mut diags);
        if diags.has_error() {
            return Err(diags);
        }

        Ok(WritableCircuitRequest {
            cid: string_or_empty(&model.cid),
            provider,
            circuit_type,
            status: model.status.as_str().unwrap_or("active").to_string(),
            tenant,
            install_date: optional_choice(&model.install_date),
            termination_date: optional_choice(&model.termination_date),
            commit_rate,
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, circuit: &Circuit, model: &mut CircuitModel) {
        model.cid = Attr::Value(circuit.cid.clone());
        model.circuit_provider = reconcile_reference(&model.circuit_provider, circuit.provider.as_ref());
        model.circuit_type = reconcile_reference(&model.circuit_type, circuit.circuit_type.as_ref());
        model.status = choice_from_api(circuit.status.as_ref(), &model.status);
        model.tenant = reconcile_reference(&model.tenant, circuit.tenant.as_ref());
        model.install_date = optional_string_from_api(circuit.install_date.as_deref(), &model.install_date);
        model.termination_date =
            optional_string_from_api(circuit.termination_date.as_deref(), &model.termination_date);
        model.commit_rate = int64_from_api(circuit.commit_rate);
        model.description = string_from_api(&circuit.description, &model.description);
        model.comments = string_from_api(&circuit.comments, &model.comments);
    }
}
