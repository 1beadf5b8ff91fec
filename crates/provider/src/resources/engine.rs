//! Generic lifecycle engine
//!
//! Every resource is one NetBox collection with the same lifecycle: build a
//! request from the plan, send it, map the response back into state. A
//! resource only describes its model, request and mapping by implementing
//! [`ObjectResource`]; [`NetBoxResource`] does the rest (client handling,
//! tags, custom fields, 404 handling, import, diagnostics and logging).

use crate::framework::{
    Attr, CreateRequest, DeleteRequest, Diagnostics, ImportRequest, ProviderData, ReadRequest,
    Resource, ResourceResponse, Schema, UpdateRequest,
};
use crate::schema_attrs::import_identity_with_custom_fields_schema;
use crate::utils::custom_fields::{
    build_custom_field_models, custom_field_names, map_to_custom_field_models, merge_custom_fields,
    CustomFieldModel,
};
use crate::utils::errors::{format_api_error, CreateErrorHandler};
use crate::utils::request::{parse_id, parse_state_id};
use crate::utils::state::id_from_api;
use crate::utils::tags::{build_tags_request, tags_from_api};
use netbox_client::{Endpoint, NetBoxClientTrait, NetBoxObject};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Flat state model of a resource
pub trait StateModel: Serialize + DeserializeOwned + Default + Send + Sync {
    /// `id` attribute
    fn id(&self) -> &Attr<String>;

    /// Set the `id` attribute
    fn set_id(&mut self, id: Attr<String>);

    /// `tags` attribute, for taggable types
    fn tags(&self) -> Option<&Attr<Vec<String>>> {
        None
    }

    /// Mutable `tags` attribute
    fn tags_mut(&mut self) -> Option<&mut Attr<Vec<String>>> {
        None
    }

    /// `custom_fields` attribute, for types with custom fields
    fn custom_fields(&self) -> Option<&Attr<Vec<CustomFieldModel>>> {
        None
    }

    /// Mutable `custom_fields` attribute
    fn custom_fields_mut(&mut self) -> Option<&mut Attr<Vec<CustomFieldModel>>> {
        None
    }
}

/// Implement [`StateModel`] for models with `id`, `tags` and `custom_fields`.
/// `@untagged` implements only `id`.
macro_rules! state_model {
    (@untagged $($model:ty),+ $(,)?) => {
        $(
            impl $crate::resources::engine::StateModel for $model {
                fn id(&self) -> &$crate::framework::Attr<String> {
                    &self.id
                }

                fn set_id(&mut self, id: $crate::framework::Attr<String>) {
                    self.id = id;
                }
            }
        )+
    };
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::resources::engine::StateModel for $model {
                fn id(&self) -> &$crate::framework::Attr<String> {
                    &self.id
                }

                fn set_id(&mut self, id: $crate::framework::Attr<String>) {
                    self.id = id;
                }

                fn tags(&self) -> Option<&$crate::framework::Attr<Vec<String>>> {
                    Some(&self.tags)
                }

                fn tags_mut(&mut self) -> Option<&mut $crate::framework::Attr<Vec<String>>> {
                    Some(&mut self.tags)
                }

                fn custom_fields(
                    &self,
                ) -> Option<&$crate::framework::Attr<Vec<$crate::utils::CustomFieldModel>>> {
                    Some(&self.custom_fields)
                }

                fn custom_fields_mut(
                    &mut self,
                ) -> Option<&mut $crate::framework::Attr<Vec<$crate::utils::CustomFieldModel>>> {
                    Some(&mut self.custom_fields)
                }
            }
        )+
    };
}
pub(crate) use state_model;

/// What a resource type contributes to the engine
#[async_trait::async_trait]
pub trait ObjectResource: Default + Send + Sync + 'static {
    /// State model
    type Model: StateModel;
    /// API object
    type Object: NetBoxObject + DeserializeOwned + Send;
    /// Writable request body, without tags and custom fields
    type Request: Serialize + Send + Sync;

    /// Type name suffix, e.g. `site_group`
    const TYPE_SUFFIX: &'static str;
    /// Collection the objects live in
    const ENDPOINT: Endpoint;
    /// Unique field used to find an existing object after a duplicate error.
    /// `None` for types no single string identifies.
    const LOOKUP_FIELD: Option<&'static str> = Some("slug");
    /// Filters narrowing that search to the plan's parents, as
    /// `(query filter, request field)`, e.g. `("device_id", "device")`
    const LOOKUP_SCOPE: &'static [(&'static str, &'static str)] = &[];
    /// Accepts `{id, custom_fields}` import identities
    const IMPORT_IDENTITY: bool = false;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Build the request body, resolving references through the client
    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &Self::Model,
    ) -> Result<Self::Request, Diagnostics>;

    /// Copy API values into the model. `id`, tags and custom fields are
    /// mapped by the engine.
    fn map_to_state(&self, object: &Self::Object, model: &mut Self::Model);
}

/// Map an API object over `model`: id, the type's own attributes, tags and
/// custom fields
pub(crate) fn map_object<R: ObjectResource>(spec: &R, object: &R::Object, model: &mut R::Model) {
    model.set_id(id_from_api(object.id()));
    spec.map_to_state(object, model);

    if let Some(tags) = model.tags_mut() {
        *tags = tags_from_api(object.tags(), tags);
    }
    if let Some(fields) = model.custom_fields_mut() {
        *fields = map_to_custom_field_models(object.custom_fields(), fields);
    }
}

#[derive(Debug, Deserialize)]
struct ImportIdentity {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    custom_fields: Option<Vec<String>>,
}

/// A [`Resource`] driven by an [`ObjectResource`]
pub struct NetBoxResource<R: ObjectResource> {
    spec: R,
    client: Option<Arc<dyn NetBoxClientTrait>>,
}

impl<R: ObjectResource> fmt::Debug for NetBoxResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetBoxResource")
            .field("type", &R::TYPE_SUFFIX)
            .field("configured", &self.client.is_some())
            .finish()
    }
}

impl<R: ObjectResource> Default for NetBoxResource<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T, Diagnostics> {
    serde_json::from_value(value.clone())
        .map_err(|e| Diagnostics::error(format!("Invalid {}", what), format!("Could not decode {}: {}", what, e)))
}

impl<R: ObjectResource> NetBoxResource<R> {
    /// Unconfigured resource
    pub fn new() -> Self {
        Self {
            spec: R::default(),
            client: None,
        }
    }

    /// Resource using `client`
    pub fn with_client(client: Arc<dyn NetBoxClientTrait>) -> Self {
        Self {
            spec: R::default(),
            client: Some(client),
        }
    }

    fn full_type_name() -> String {
        format!("netbox_{}", R::TYPE_SUFFIX)
    }

    fn client(&self) -> Result<&dyn NetBoxClientTrait, Diagnostics> {
        self.client.as_deref().ok_or_else(|| {
            Diagnostics::error(
                "Unconfigured Netbox Client",
                format!(
                    "{} was used before the provider was configured. Set server_url and api_token.",
                    Self::full_type_name()
                ),
            )
        })
    }

    fn object_id(model: &R::Model) -> Result<u64, Diagnostics> {
        parse_state_id(model.id(), &R::ENDPOINT.title())
    }

    fn decode_object(&self, value: Value) -> Result<R::Object, Diagnostics> {
        serde_json::from_value(value).map_err(|e| {
            Diagnostics::error(
                format!("Error decoding {}", R::ENDPOINT.label),
                format!("Could not decode the {} returned by Netbox: {}", R::ENDPOINT.label, e),
            )
        })
    }

    /// Value of the lookup field in the plan, for duplicate hints
    fn lookup_value(model: &R::Model) -> String {
        let Some(field) = R::LOOKUP_FIELD else {
            return String::new();
        };
        serde_json::to_value(model)
            .ok()
            .and_then(|v| v.get(field).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default()
    }

    /// Scope filters taken from the resolved ids in the request body
    fn lookup_scope(body: &Value) -> Vec<(&'static str, String)> {
        R::LOOKUP_SCOPE
            .iter()
            .filter_map(|(filter, field)| {
                body.get(*field)
                    .and_then(Value::as_u64)
                    .map(|id| (*filter, id.to_string()))
            })
            .collect()
    }

    async fn request_body(
        &self,
        client: &dyn NetBoxClientTrait,
        plan: &R::Model,
        prior: Option<&R::Model>,
    ) -> Result<Value, Diagnostics> {
        let request = self.spec.build_request(client, plan).await?;
        let mut body = serde_json::to_value(&request).map_err(|e| {
            Diagnostics::error(
                "Error building request",
                format!("Could not encode the {} request: {}", R::ENDPOINT.label, e),
            )
        })?;

        if let (Some(tags), Some(object)) = (plan.tags(), body.as_object_mut()) {
            let tags = build_tags_request(client, tags).await?;
            object.insert("tags".to_string(), json!(tags));
        }
        if let (Some(planned), Some(object)) = (plan.custom_fields(), body.as_object_mut()) {
            let merged = merge_custom_fields(planned, prior.and_then(|m| m.custom_fields()));
            if !merged.is_empty() {
                object.insert("custom_fields".to_string(), Value::Object(merged));
            }
        }
        debug!("{} request body: {}", R::ENDPOINT.title(), body);
        Ok(body)
    }

    /// Map an API object over `model` and shape the state and identity
    fn finish(&self, object: &R::Object, mut model: R::Model) -> ResourceResponse {
        map_object(&self.spec, object, &mut model);

        let identity = R::IMPORT_IDENTITY.then(|| {
            let names = model
                .custom_fields()
                .map(custom_field_names)
                .unwrap_or_default();
            json!({"id": object.id().to_string(), "custom_fields": names})
        });

        match serde_json::to_value(&model) {
            Ok(state) => ResourceResponse::with_state(self.spec.schema().conform(state), identity),
            Err(e) => ResourceResponse::from_diagnostics(Diagnostics::error(
                "Error encoding state",
                format!("Could not encode {} state: {}", R::ENDPOINT.label, e),
            )),
        }
    }

    fn planned(&self, plan: &Value, prior: Option<&Value>) -> Result<R::Model, Diagnostics> {
        let schema = self.spec.schema();
        let mut plan = plan.clone();
        if let Some(prior) = prior {
            schema.carry_state(&mut plan, prior);
        }
        schema.apply_defaults(&mut plan);
        decode(&plan, "plan")
    }

    async fn create_object(&self, request: CreateRequest) -> Result<ResourceResponse, Diagnostics> {
        let client = self.client()?;
        let plan = self.planned(&request.plan, None)?;
        let body = self.request_body(client, &plan, None).await?;

        let created = match client.create(&R::ENDPOINT, &body).await {
            Ok(created) => created,
            Err(e) => {
                let handler = CreateErrorHandler {
                    resource_type: Self::full_type_name(),
                    endpoint: &R::ENDPOINT,
                    lookup_field: R::LOOKUP_FIELD,
                    lookup_value: Self::lookup_value(&plan),
                    scope: Self::lookup_scope(&body),
                };
                return Err(handler.handle(client, &e).await);
            }
        };
        let object = self.decode_object(created)?;
        info!("Created {} {} ({})", R::ENDPOINT.label, object.display(), object.id());
        Ok(self.finish(&object, plan))
    }

    async fn read_object(&self, request: ReadRequest) -> Result<ResourceResponse, Diagnostics> {
        let client = self.client()?;
        let state: R::Model = decode(&request.state, "state")?;
        let id = Self::object_id(&state)?;

        let object = match client.retrieve(&R::ENDPOINT, id).await {
            Ok(object) => object,
            Err(e) if e.is_not_found() => {
                warn!(
                    "{} {} was deleted in NetBox (drift detected), removing from state",
                    R::ENDPOINT.title(),
                    id
                );
                return Ok(ResourceResponse::default());
            }
            Err(e) => {
                return Err(Diagnostics::error(
                    format!("Error reading {}", R::ENDPOINT.label),
                    format_api_error(&format!("read {} ID {}", R::ENDPOINT.label, id), &e),
                ));
            }
        };
        let object = self.decode_object(object)?;
        debug!("Read {} {}", R::ENDPOINT.label, id);
        Ok(self.finish(&object, state))
    }

    async fn update_object(&self, request: UpdateRequest) -> Result<ResourceResponse, Diagnostics> {
        let client = self.client()?;
        let prior: R::Model = decode(&request.state, "state")?;
        let plan = self.planned(&request.plan, Some(&request.state))?;
        let id = Self::object_id(&prior)?;
        let body = self.request_body(client, &plan, Some(&prior)).await?;

        let updated = client.update(&R::ENDPOINT, id, &body).await.map_err(|e| {
            Diagnostics::error(
                format!("Error updating {}", R::ENDPOINT.label),
                format_api_error(&format!("update {} ID {}", R::ENDPOINT.label, id), &e),
            )
        })?;
        let object = self.decode_object(updated)?;
        info!("Updated {} {} ({})", R::ENDPOINT.label, object.display(), id);
        Ok(self.finish(&object, plan))
    }

    async fn delete_object(&self, request: DeleteRequest) -> Result<ResourceResponse, Diagnostics> {
        let client = self.client()?;
        let state: R::Model = decode(&request.state, "state")?;
        let id = Self::object_id(&state)?;

        match client.destroy(&R::ENDPOINT, id).await {
            Ok(()) => info!("Deleted {} {}", R::ENDPOINT.label, id),
            Err(e) if e.is_not_found() => debug!("{} {} already deleted", R::ENDPOINT.title(), id),
            Err(e) => {
                return Err(Diagnostics::error(
                    format!("Error deleting {}", R::ENDPOINT.label),
                    format_api_error(&format!("delete {} ID {}", R::ENDPOINT.label, id), &e),
                ));
            }
        }
        Ok(ResourceResponse::default())
    }

    async fn import_object(&self, request: ImportRequest) -> Result<ResourceResponse, Diagnostics> {
        let identity = match (&request.identity, R::IMPORT_IDENTITY) {
            (Some(identity), true) if !identity.is_null() => Some(decode::<ImportIdentity>(identity, "import identity")?),
            _ => None,
        };

        let Some(identity) = identity else {
            parse_id(&request.id).map_err(|e| {
                Diagnostics::error(
                    "Invalid Import ID",
                    format!("{} import ID must be a number, got: {:?} ({})", R::ENDPOINT.title(), request.id, e),
                )
            })?;
            debug!("Importing {} {} by id", R::ENDPOINT.label, request.id);
            let state = self.spec.schema().conform(json!({"id": request.id}));
            return Ok(ResourceResponse::with_state(state, None));
        };

        let raw_id = identity.id.unwrap_or_default();
        if raw_id.is_empty() {
            return Err(Diagnostics::error("Invalid import identity", "Identity id must be provided."));
        }
        let id = parse_id(&raw_id).map_err(|e| {
            Diagnostics::error(
                "Invalid import identity",
                format!("Identity id must be a number, got: {:?} ({})", raw_id, e),
            )
        })?;

        let client = self.client()?;
        let object = client.retrieve(&R::ENDPOINT, id).await.map_err(|e| {
            Diagnostics::error(
                format!("Error importing {}", R::ENDPOINT.label),
                format_api_error(&format!("read {} ID {}", R::ENDPOINT.label, id), &e),
            )
        })?;
        let object = self.decode_object(object)?;

        let mut model = R::Model::default();
        if let (Some(fields), Some(names)) = (model.custom_fields_mut(), identity.custom_fields.as_deref()) {
            *fields = Attr::Value(build_custom_field_models(object.custom_fields(), Some(names)));
        }
        info!("Imported {} {} ({})", R::ENDPOINT.label, object.display(), id);
        Ok(self.finish(&object, model))
    }
}

#[async_trait::async_trait]
impl<R: ObjectResource> Resource for NetBoxResource<R> {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, R::TYPE_SUFFIX)
    }

    fn schema(&self) -> Schema {
        self.spec.schema()
    }

    fn identity_schema(&self) -> Option<Schema> {
        R::IMPORT_IDENTITY.then(import_identity_with_custom_fields_schema)
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
                "Unexpected Resource Configure Type",
                "Expected a Netbox API client as provider data. Please report this issue to the provider developers.",
            ),
        }
    }

    async fn create(&self, request: CreateRequest) -> ResourceResponse {
        self.create_object(request)
            .await
            .unwrap_or_else(ResourceResponse::from_diagnostics)
    }

    async fn read(&self, request: ReadRequest) -> ResourceResponse {
        self.read_object(request)
            .await
            .unwrap_or_else(ResourceResponse::from_diagnostics)
    }

    async fn update(&self, request: UpdateRequest) -> ResourceResponse {
        self.update_object(request)
            .await
            .unwrap_or_else(ResourceResponse::from_diagnostics)
    }

    async fn delete(&self, request: DeleteRequest) -> ResourceResponse {
        self.delete_object(request)
            .await
            .unwrap_or_else(ResourceResponse::from_diagnostics)
    }

    async fn import_state(&self, request: ImportRequest) -> ResourceResponse {
        self.import_object(request)
            .await
            .unwrap_or_else(ResourceResponse::from_diagnostics)
    }
}
