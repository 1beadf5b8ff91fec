//! Line-oriented host protocol
//!
//! Each request is one JSON object on a line of stdin, tagged by `op`; each
//! response is one JSON object on a line of stdout:
//!
//! ```text
//! {"op":"create","type":"netbox_site","plan":{"name":"Paris","slug":"paris"}}
//! {"ok":true,"state":{"id":"1",...},"diagnostics":[]}
//! {"op":"read_data_source","type":"netbox_site","config":{"slug":"paris"}}
//! ```

use crate::error::ProviderError;
use crate::framework::{
    CreateRequest, DataSource, DataSourceReadRequest, DeleteRequest, Diagnostics, ImportRequest,
    ReadRequest, Resource, ResourceResponse, UpdateRequest,
};
use crate::provider::NetboxProvider;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// One host request
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostRequest {
    /// Provider and resource schemas
    Schema,
    /// Configure the provider
    Configure {
        /// Provider block
        #[serde(default)]
        config: Value,
    },
    /// Validate a resource configuration
    Validate {
        /// Resource type name
        #[serde(rename = "type")]
        type_name: String,
        /// Resource configuration
        #[serde(default)]
        config: Value,
    },
    /// Create a resource
    Create {
        /// Resource type name
        #[serde(rename = "type")]
        type_name: String,
        /// Planned state
        plan: Value,
    },
    /// Refresh a resource
    Read {
        /// Resource type name
        #[serde(rename = "type")]
        type_name: String,
        /// Prior state
        state: Value,
        /// Prior identity
        #[serde(default)]
        identity: Option<Value>,
    },
    /// Update a resource
    Update {
        /// Resource type name
        #[serde(rename = "type")]
        type_name: String,
        /// Planned state
        plan: Value,
        /// Prior state
        state: Value,
    },
    /// Delete a resource
    Delete {
        /// Resource type name
        #[serde(rename = "type")]
        type_name: String,
        /// Prior state
        state: Value,
    },
    /// Import an existing object
    Import {
        /// Resource type name
        #[serde(rename = "type")]
        type_name: String,
        /// Import id
        #[serde(default)]
        id: String,
        /// Structured identity
        #[serde(default)]
        identity: Option<Value>,
    },
    /// Look up an object through a data source
    ReadDataSource {
        /// Data source type name
        #[serde(rename = "type")]
        type_name: String,
        /// Data source configuration
        #[serde(default)]
        config: Value,
    },
}

/// One host response
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostResponse {
    /// No error diagnostics
    pub ok: bool,
    /// Schemas, for `schema`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// New state; `null` after a read means the object is gone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// New identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Value>,
    /// Errors and warnings
    pub diagnostics: Diagnostics,
}

impl HostResponse {
    fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            ok: !diagnostics.has_error(),
            diagnostics,
            ..Self::default()
        }
    }

    fn from_resource(response: ResourceResponse, keep_null_state: bool) -> Self {
        let state = match response.state {
            Some(state) => Some(state),
            None if keep_null_state => Some(Value::Null),
            None => None,
        };
        Self {
            ok: !response.diagnostics.has_error(),
            schema: None,
            state,
            identity: response.identity,
            diagnostics: response.diagnostics,
        }
    }
}

/// Serves host requests against one provider
#[derive(Debug)]
pub struct Server {
    provider: NetboxProvider,
}

impl Server {
    /// Server for `provider`
    pub fn new(provider: NetboxProvider) -> Self {
        Self { provider }
    }

    /// The provider being served
    pub fn provider(&self) -> &NetboxProvider {
        &self.provider
    }

    fn resource(&self, type_name: &str) -> Result<Box<dyn Resource>, Diagnostics> {
        self.provider.resource(type_name).ok_or_else(|| {
            Diagnostics::error(
                "Unknown Resource Type",
                ProviderError::UnknownResource(type_name.to_string()).to_string(),
            )
        })
    }

    fn data_source(&self, type_name: &str) -> Result<Box<dyn DataSource>, Diagnostics> {
        self.provider.data_source(type_name).ok_or_else(|| {
            Diagnostics::error(
                "Unknown Data Source Type",
                ProviderError::UnknownDataSource(type_name.to_string()).to_string(),
            )
        })
    }

    fn schemas(&self) -> Value {
        let mut resources = Map::new();
        for new in self.provider.resources() {
            let resource = new();
            let mut entry = json!({"schema": resource.schema().to_json()});
            if let Some(identity) = resource.identity_schema() {
                entry["identity"] = identity.to_json();
            }
            resources.insert(resource.type_name(self.provider.type_name()), entry);
        }
        let data_sources: Map<String, Value> = self
            .provider
            .data_sources()
            .iter()
            .map(|new| {
                let source = new();
                (
                    source.type_name(self.provider.type_name()),
                    json!({"schema": source.schema().to_json()}),
                )
            })
            .collect();
        json!({
            "provider": self.provider.schema().to_json(),
            "version": self.provider.version(),
            "resources": resources,
            "data_sources": data_sources,
        })
    }

    /// Handle one request
    pub async fn handle(&mut self, request: HostRequest) -> HostResponse {
        match request {
            HostRequest::Schema => HostResponse {
                ok: true,
                schema: Some(self.schemas()),
                ..HostResponse::default()
            },
            HostRequest::Configure { config } => {
                let mut diags = self.provider.schema().validate(&config);
                if !diags.has_error() {
                    diags.extend(self.provider.configure(&config));
                }
                HostResponse::from_diagnostics(diags)
            }
            HostRequest::Validate { type_name, config } => match self.resource(&type_name) {
                Ok(resource) => HostResponse::from_diagnostics(resource.validate_config(&config)),
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
            HostRequest::Create { type_name, plan } => match self.resource(&type_name) {
                Ok(resource) => {
                    let diags = validate_plan(resource.as_ref(), &plan);
                    if diags.has_error() {
                        return HostResponse::from_diagnostics(diags);
                    }
                    HostResponse::from_resource(resource.create(CreateRequest { plan }).await, false)
                }
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
            HostRequest::Read {
                type_name,
                state,
                identity,
            } => match self.resource(&type_name) {
                Ok(resource) => {
                    HostResponse::from_resource(resource.read(ReadRequest { state, identity }).await, true)
                }
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
            HostRequest::Update {
                type_name,
                plan,
                state,
            } => match self.resource(&type_name) {
                Ok(resource) => {
                    let diags = validate_plan(resource.as_ref(), &plan);
                    if diags.has_error() {
                        return HostResponse::from_diagnostics(diags);
                    }
                    HostResponse::from_resource(resource.update(UpdateRequest { plan, state }).await, false)
                }
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
            HostRequest::Delete { type_name, state } => match self.resource(&type_name) {
                Ok(resource) => HostResponse::from_resource(resource.delete(DeleteRequest { state }).await, false),
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
            HostRequest::Import {
                type_name,
                id,
                identity,
            } => match self.resource(&type_name) {
                Ok(resource) => {
                    let response = resource.import_state(ImportRequest { id, identity }).await;
                    HostResponse::from_resource(response, false)
                }
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
            HostRequest::ReadDataSource { type_name, config } => match self.data_source(&type_name) {
                Ok(source) => {
                    let diags = source.validate_config(&config);
                    if diags.has_error() {
                        return HostResponse::from_diagnostics(diags);
                    }
                    let response = source.read(DataSourceReadRequest { config }).await;
                    HostResponse {
                        ok: !response.diagnostics.has_error(),
                        state: response.state,
                        diagnostics: response.diagnostics,
                        ..HostResponse::default()
                    }
                }
                Err(diags) => HostResponse::from_diagnostics(diags),
            },
        }
    }

    /// Parse and handle one request line
    pub async fn handle_line(&mut self, line: &str) -> HostResponse {
        match serde_json::from_str::<HostRequest>(line) {
            Ok(request) => {
                debug!("Host request: {:?}", request_op(&request));
                self.handle(request).await
            }
            Err(e) => {
                warn!("Malformed host request: {}", e);
                HostResponse::from_diagnostics(Diagnostics::error(
                    "Invalid Request",
                    ProviderError::Protocol(e).to_string(),
                ))
            }
        }
    }

    /// Serve requests until `reader` is exhausted
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), ProviderError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut handled = 0usize;
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line).await;
            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
            handled += 1;
        }
        info!("Input closed after {} request(s)", handled);
        Ok(())
    }
}

/// Validate a plan as configuration, ignoring attributes only the provider sets
fn validate_plan(resource: &dyn Resource, plan: &Value) -> Diagnostics {
    let schema = resource.schema();
    let mut config = plan.clone();
    if let Some(object) = config.as_object_mut() {
        object.retain(|name, _| schema.get(name).is_none_or(|attribute| !attribute.is_read_only()));
    }
    schema.validate(&config)
}

fn request_op(request: &HostRequest) -> (&'static str, Option<&str>) {
    match request {
        HostRequest::Schema => ("schema", None),
        HostRequest::Configure { .. } => ("configure", None),
        HostRequest::Validate { type_name, .. } => ("validate", Some(type_name.as_str())),
        HostRequest::Create { type_name, .. } => ("create", Some(type_name.as_str())),
        HostRequest::Read { type_name, .. } => ("read", Some(type_name.as_str())),
        HostRequest::Update { type_name, .. } => ("update", Some(type_name.as_str())),
        HostRequest::Delete { type_name, .. } => ("delete", Some(type_name.as_str())),
        HostRequest::Import { type_name, .. } => ("import", Some(type_name.as_str())),
        HostRequest::ReadDataSource { type_name, .. } => ("read_data_source", Some(type_name.as_str())),
    }
}
