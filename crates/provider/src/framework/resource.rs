//! The managed-resource lifecycle contract

use super::diag::Diagnostics;
use super::schema::Schema;
use serde_json::Value;
use std::any::Any;

/// Opaque data the provider hands to each resource during configuration
pub type ProviderData = dyn Any + Send + Sync;

/// Create: the planned attribute values
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Planned state
    pub plan: Value,
}

/// Read (refresh): the prior state
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Prior state
    pub state: Value,
    /// Prior identity, when the resource has one
    pub identity: Option<Value>,
}

/// Update: planned values plus the prior state
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Planned state
    pub plan: Value,
    /// Prior state
    pub state: Value,
}

/// Delete: the prior state
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    /// Prior state
    pub state: Value,
}

/// Import: an id string, or a structured identity
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Import id given on the command line
    pub id: String,
    /// Structured identity from an import block
    pub identity: Option<Value>,
}

/// Result of a lifecycle operation
///
/// `state: None` after read means the object is gone and must be removed
/// from state; after delete it is the normal outcome.
#[derive(Debug, Clone, Default)]
pub struct ResourceResponse {
    /// New state
    pub state: Option<Value>,
    /// New identity
    pub identity: Option<Value>,
    /// Errors and warnings
    pub diagnostics: Diagnostics,
}

impl ResourceResponse {
    /// Response carrying only diagnostics
    pub fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics,
            ..Self::default()
        }
    }

    /// Response carrying a state and identity
    pub fn with_state(state: Value, identity: Option<Value>) -> Self {
        Self {
            state: Some(state),
            identity,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// A managed resource type
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `netbox_site` for provider type name `netbox`
    fn type_name(&self, provider_type_name: &str) -> String;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Import identity schema, for resources that support identity import
    fn identity_schema(&self) -> Option<Schema> {
        None
    }

    /// Receive provider data. `None` happens before the provider is
    /// configured and is not an error.
    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics;

    /// Validate configuration against the schema
    fn validate_config(&self, config: &Value) -> Diagnostics {
        self.schema().validate(config)
    }

    /// Create the remote object
    async fn create(&self, request: CreateRequest) -> ResourceResponse;

    /// Refresh state from the remote object
    async fn read(&self, request: ReadRequest) -> ResourceResponse;

    /// Replace the remote object
    async fn update(&self, request: UpdateRequest) -> ResourceResponse;

    /// Delete the remote object
    async fn delete(&self, request: DeleteRequest) -> ResourceResponse;

    /// Bring an existing object under management
    async fn import_state(&self, request: ImportRequest) -> ResourceResponse;
}
