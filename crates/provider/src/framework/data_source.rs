//! The read-only data source contract

use super::diag::Diagnostics;
use super::resource::ProviderData;
use super::schema::Schema;
use serde_json::Value;

/// Read: the data source configuration
#[derive(Debug, Clone)]
pub struct DataSourceReadRequest {
    /// Configured lookup attributes
    pub config: Value,
}

/// Result of a data source read
#[derive(Debug, Clone, Default)]
pub struct DataSourceResponse {
    /// Every attribute of the object found
    pub state: Option<Value>,
    /// Errors and warnings
    pub diagnostics: Diagnostics,
}

impl DataSourceResponse {
    /// Response carrying only diagnostics
    pub fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }
}

/// A data source type: looks up one existing object
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name, e.g. `netbox_site`
    fn type_name(&self, provider_type_name: &str) -> String;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Receive provider data, as [`super::Resource::configure`]
    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics;

    /// Validate configuration against the schema
    fn validate_config(&self, config: &Value) -> Diagnostics {
        self.schema().validate(config)
    }

    /// Find the object and report all of its attributes
    async fn read(&self, request: DataSourceReadRequest) -> DataSourceResponse;
}
