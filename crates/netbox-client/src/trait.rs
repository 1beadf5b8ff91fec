//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.
//!
//! Operations are expressed per [`Endpoint`] and exchange raw JSON; the
//! typed layer in [`crate::api`] deserializes into the models.

use crate::endpoint::Endpoint;
use crate::error::NetBoxError;
use serde_json::Value;

/// Trait for NetBox API client operations
///
/// This trait enables mocking of NetBox API calls for unit testing.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    /// `GET /api/<endpoint>/<id>/`, mapping 404 to [`NetBoxError::NotFound`]
    async fn retrieve(&self, endpoint: &Endpoint, id: u64) -> Result<Value, NetBoxError>;

    /// `GET /api/<endpoint>/?<filters>`, optionally following every page
    async fn list(
        &self,
        endpoint: &Endpoint,
        filters: &[(&str, &str)],
        fetch_all: bool,
    ) -> Result<Vec<Value>, NetBoxError>;

    /// `POST /api/<endpoint>/`
    async fn create(&self, endpoint: &Endpoint, body: &Value) -> Result<Value, NetBoxError>;

    /// `PUT /api/<endpoint>/<id>/`
    async fn update(&self, endpoint: &Endpoint, id: u64, body: &Value) -> Result<Value, NetBoxError>;

    /// `PATCH /api/<endpoint>/<id>/`
    async fn patch(&self, endpoint: &Endpoint, id: u64, body: &Value) -> Result<Value, NetBoxError>;

    /// `DELETE /api/<endpoint>/<id>/`
    async fn destroy(&self, endpoint: &Endpoint, id: u64) -> Result<(), NetBoxError>;
}
