//! Data sources over the resource definitions
//!
//! Every resource type doubles as a data source of the same name. The
//! schema is the resource schema with every attribute computed; `id`,
//! `slug`, `name` and the type's lookup field (where the type has them)
//! become optional lookup keys. One matching object fills the state.

use super::engine::{map_object, ObjectResource, StateModel};
use crate::framework::value::is_unknown_value;
use crate::framework::{
    Attr, Attribute, AttributeKind, DataSource, DataSourceReadRequest, DataSourceResponse, Diagnostics,
    ProviderData, Schema,
};
use crate::utils::custom_fields::build_custom_field_models;
use crate::utils::errors::format_api_error;
use crate::utils::request::parse_id;
use crate::validators;
use netbox_client::{api, NetBoxClientTrait, NetBoxObject};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A [`DataSource`] driven by an [`ObjectResource`]
pub struct NetBoxDataSource<R: ObjectResource> {
    spec: R,
    client: Option<Arc<dyn NetBoxClientTrait>>,
}

impl<R: ObjectResource> fmt::Debug for NetBoxDataSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetBoxDataSource")
            .field("type", &R::TYPE_SUFFIX)
            .field("configured", &self.client.is_some())
            .finish()
    }
}

impl<R: ObjectResource> Default for NetBoxDataSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ObjectResource> NetBoxDataSource<R> {
    /// Unconfigured data source
    pub fn new() -> Self {
        Self {
            spec: R::default(),
            client: None,
        }
    }

    /// Data source using `client`
    pub fn with_client(client: Arc<dyn NetBoxClientTrait>) -> Self {
        Self {
            client: Some(client),
            ..Self::new()
        }
    }

    /// String attributes that can identify an object of this type
    fn lookup_keys(resource: &Schema) -> Vec<&'static str> {
        let mut keys = vec!["id", "slug", "name"];
        if let Some(field) = R::LOOKUP_FIELD.filter(|field| !keys.contains(field)) {
            keys.push(field);
        }
        keys.retain(|key| {
            resource
                .get(key)
                .is_some_and(|attribute| attribute.kind == AttributeKind::String)
        });
        keys
    }

    fn client(&self) -> Result<&dyn NetBoxClientTrait, Diagnostics> {
        self.client.as_deref().ok_or_else(|| {
            Diagnostics::error(
                "Unconfigured Netbox Client",
                format!(
                    "data source netbox_{} was read before the provider was configured. Set server_url and api_token.",
                    R::TYPE_SUFFIX
                ),
            )
        })
    }

    fn not_found(filters: &[(&'static str, String)]) -> Diagnostics {
        Diagnostics::error(
            format!("{} not found", R::ENDPOINT.title()),
            format!("No {} matches {}.", R::ENDPOINT.label, describe(filters)),
        )
    }

    async fn find(&self, client: &dyn NetBoxClientTrait, config: &Value) -> Result<R::Object, Diagnostics> {
        let keys = Self::lookup_keys(&self.spec.schema());
        let filters: Vec<(&'static str, String)> = keys
            .iter()
            .filter_map(|key| {
                config
                    .get(*key)
                    .filter(|value| !is_unknown_value(value))
                    .and_then(Value::as_str)
                    .filter(|value| !value.is_empty())
                    .map(|value| (*key, value.to_string()))
            })
            .collect();
        if filters.is_empty() {
            return Err(Diagnostics::error(
                "Missing lookup attribute",
                format!("Set one of {} to look up a {}.", keys.join(", "), R::ENDPOINT.label),
            ));
        }
        debug!("Looking up {} by {}", R::ENDPOINT.label, describe(&filters));

        if let [("id", raw)] = filters.as_slice() {
            let id = parse_id(raw).map_err(|e| {
                Diagnostics::error("Invalid ID", format!("{} ID must be a number: {}", R::ENDPOINT.title(), e))
            })?;
            return api::get::<R::Object>(client, &R::ENDPOINT, id).await.map_err(|e| {
                if e.is_not_found() {
                    Self::not_found(&filters)
                } else {
                    Diagnostics::error(
                        format!("Error reading {}", R::ENDPOINT.label),
                        format_api_error(&format!("read {} ID {}", R::ENDPOINT.label, id), &e),
                    )
                }
            });
        }

        let query: Vec<(&str, &str)> = filters.iter().map(|(key, value)| (*key, value.as_str())).collect();
        let mut found = api::list::<R::Object>(client, &R::ENDPOINT, &query)
            .await
            .map_err(|e| {
                Diagnostics::error(
                    format!("Error listing {}", R::ENDPOINT.label),
                    format_api_error(&format!("list {} objects", R::ENDPOINT.label), &e),
                )
            })?;
        if found.len() > 1 {
            return Err(Diagnostics::error(
                format!("Multiple {} objects found", R::ENDPOINT.label),
                format!(
                    "{} objects match {}. Add more lookup attributes or use id.",
                    found.len(),
                    describe(&filters)
                ),
            ));
        }
        found.pop().ok_or_else(|| Self::not_found(&filters))
    }

    async fn read_object(&self, request: DataSourceReadRequest) -> Result<DataSourceResponse, Diagnostics> {
        let client = self.client()?;
        let object = self.find(client, &request.config).await?;

        // configured keys keep their spelling through the usual reconciliation
        let mut model: R::Model = serde_json::from_value(request.config).map_err(|e| {
            Diagnostics::error("Invalid configuration", format!("Could not decode configuration: {}", e))
        })?;
        map_object(&self.spec, &object, &mut model);
        if let Some(fields) = model.custom_fields_mut() {
            let all = build_custom_field_models(object.custom_fields(), None);
            *fields = if all.is_empty() { Attr::Null } else { Attr::Value(all) };
        }
        debug!("Found {} {} ({})", R::ENDPOINT.label, object.display(), object.id());

        let state = serde_json::to_value(&model).map_err(|e| {
            Diagnostics::error(
                "Error encoding state",
                format!("Could not encode {} state: {}", R::ENDPOINT.label, e),
            )
        })?;
        Ok(DataSourceResponse {
            state: Some(self.schema().conform(state)),
            diagnostics: Diagnostics::new(),
        })
    }
}

fn describe(filters: &[(&'static str, String)]) -> String {
    filters
        .iter()
        .map(|(key, value)| format!("{} {:?}", key, value))
        .collect::<Vec<_>>()
        .join(" and ")
}

#[async_trait::async_trait]
impl<R: ObjectResource> DataSource for NetBoxDataSource<R> {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, R::TYPE_SUFFIX)
    }

    fn schema(&self) -> Schema {
        let resource = self.spec.schema();
        let keys = Self::lookup_keys(&resource);
        let mut schema = Schema::new(format!(
            "Looks up an existing {} in Netbox by {}.",
            R::ENDPOINT.label,
            keys.join(", ")
        ));
        for (name, source) in resource.attributes {
            let mut attribute = if keys.contains(&name.as_str()) {
                Attribute::optional_computed(source.kind, source.description)
            } else {
                Attribute::computed(source.kind, source.description)
            };
            attribute.sensitive = source.sensitive;
            if name == "id" {
                attribute = attribute.validator(validators::integer_id());
            }
            schema = schema.attribute(&name, attribute);
        }
        schema
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        let Some(data) = provider_data else {
            return Diagnostics::new();
        };
        match data.downcast_ref::<Arc<dyn NetBoxClientTrait>>() {
            Some(client) => {
                self.client = Some(Arc::clone(client));
                Diagnostics::new()
            }
            None => Diagnostics::error(
                "Unexpected Data Source Configure Type",
                "Expected a Netbox API client as provider data. Please report this issue to the provider developers.",
            ),
        }
    }

    async fn read(&self, request: DataSourceReadRequest) -> DataSourceResponse {
        self.read_object(request)
            .await
            .unwrap_or_else(DataSourceResponse::from_diagnostics)
    }
}
