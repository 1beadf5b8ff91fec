//! NetBox API client
//!
//! Implements the NetBox REST API client over [`HttpClient`].
//! Based on the NetBox API structure: `/api/<app>/<object>/` for collections
//! and `/api/<app>/<object>/<id>/` for single objects.

use crate::common::query::query_resources;
use crate::common::HttpClient;
use crate::endpoint::Endpoint;
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_options(base_url, token, false)
    }

    /// Create a client, optionally skipping TLS certificate verification
    ///
    /// `insecure` is meant for lab instances with self-signed certificates.
    pub fn with_options(base_url: String, token: String, insecure: bool) -> Result<Self, NetBoxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(NetBoxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// This method tests connectivity and token validity before proceeding with operations.
    /// It makes a lightweight request to the NetBox status endpoint.
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _: Value = self.http.get("/api/status/").await?;
        debug!("Token validated successfully");
        Ok(())
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        NetBoxClient::validate_token(self).await
    }

    async fn retrieve(&self, endpoint: &Endpoint, id: u64) -> Result<Value, NetBoxError> {
        debug!("Fetching {} {} from NetBox", endpoint.label, id);
        self.http.get(&endpoint.object_path(id)).await
    }

    async fn list(
        &self,
        endpoint: &Endpoint,
        filters: &[(&str, &str)],
        fetch_all: bool,
    ) -> Result<Vec<Value>, NetBoxError> {
        debug!("Querying {} objects with filters {:?}", endpoint.label, filters);
        query_resources(&self.http, endpoint, filters, fetch_all).await
    }

    async fn create(&self, endpoint: &Endpoint, body: &Value) -> Result<Value, NetBoxError> {
        self.http.post(&endpoint.collection_path(), body).await
    }

    async fn update(&self, endpoint: &Endpoint, id: u64, body: &Value) -> Result<Value, NetBoxError> {
        self.http.put(&endpoint.object_path(id), body).await
    }

    async fn patch(&self, endpoint: &Endpoint, id: u64, body: &Value) -> Result<Value, NetBoxError> {
        self.http.patch(&endpoint.object_path(id), body).await
    }

    async fn destroy(&self, endpoint: &Endpoint, id: u64) -> Result<(), NetBoxError> {
        self.http.delete(&endpoint.object_path(id)).await
    }
}
