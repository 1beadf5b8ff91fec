//! The `netbox` provider: configuration and the resource and data source
//! registries

use crate::config::{mask_token, ProviderConfig, ProviderConfigModel};
use crate::framework::{Attribute, AttributeKind, DataSource, Diagnostics, ProviderData, Resource, Schema};
use crate::resources::{self, DataSourceFactory, ResourceFactory};
use netbox_client::{NetBoxClient, NetBoxClientTrait};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Provider type name, the prefix of every resource type
pub const TYPE_NAME: &str = "netbox";

/// Provider instance
pub struct NetboxProvider {
    version: String,
    client: Option<Arc<dyn NetBoxClientTrait>>,
}

impl std::fmt::Debug for NetboxProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetboxProvider")
            .field("version", &self.version)
            .field("configured", &self.client.is_some())
            .finish()
    }
}

impl NetboxProvider {
    /// Unconfigured provider
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            client: None,
        }
    }

    /// Provider already configured with `client`
    pub fn with_client(version: impl Into<String>, client: Arc<dyn NetBoxClientTrait>) -> Self {
        Self {
            version: version.into(),
            client: Some(client),
        }
    }

    /// Provider type name
    pub fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    /// Provider version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// True once a client exists
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Provider block schema
    pub fn schema(&self) -> Schema {
        Schema::new(
            "The Netbox provider manages objects in Netbox, the network source of truth: sites, \
             devices, interfaces, IP addresses, circuits, tunnels and more.",
        )
        .attribute(
            "server_url",
            Attribute::optional(
                AttributeKind::String,
                "The base URL of your Netbox instance (e.g., `https://netbox.example.com`). Can also \
                 be set via the `NETBOX_SERVER_URL` environment variable.",
            ),
        )
        .attribute(
            "api_token",
            Attribute::optional(
                AttributeKind::String,
                "The API token for authenticating with Netbox. Can also be set via the \
                 `NETBOX_API_TOKEN` environment variable.",
            )
            .sensitive(),
        )
        .attribute(
            "insecure",
            Attribute::optional(
                AttributeKind::Bool,
                "Whether to skip TLS certificate verification. Defaults to false. Can also be set \
                 via the `NETBOX_INSECURE` environment variable.",
            ),
        )
    }

    /// Configure from the provider block, falling back to the environment
    pub fn configure(&mut self, config: &Value) -> Diagnostics {
        self.configure_with_env(config, |name| std::env::var(name).ok())
    }

    /// [`Self::configure`] with an explicit environment
    pub fn configure_with_env(&mut self, config: &Value, env: impl Fn(&str) -> Option<String>) -> Diagnostics {
        let model: ProviderConfigModel = match serde_json::from_value(config.clone()) {
            Ok(model) => model,
            Err(e) => {
                return Diagnostics::error(
                    "Invalid provider configuration",
                    format!("Could not decode the provider configuration: {}", e),
                );
            }
        };
        let resolved = match ProviderConfig::resolve(&model, env) {
            Ok(resolved) => resolved,
            Err(diags) => return diags,
        };

        debug!(
            "Creating Netbox client for {} (token {}, insecure {})",
            resolved.server_url,
            mask_token(&resolved.api_token),
            resolved.insecure
        );
        if resolved.insecure {
            debug!("Insecure mode enabled - TLS verification disabled");
        }
        match NetBoxClient::with_options(resolved.server_url.clone(), resolved.api_token, resolved.insecure) {
            Ok(client) => {
                self.client = Some(Arc::new(client));
                info!("Configured Netbox client for {}", resolved.server_url);
                Diagnostics::new()
            }
            Err(e) => Diagnostics::error(
                "Unable to Create Netbox API Client",
                format!("An unexpected error occurred when creating the Netbox API client: {}", e),
            ),
        }
    }

    /// Constructors of every resource type
    pub fn resources(&self) -> Vec<ResourceFactory> {
        resources::registry()
    }

    /// Full type names of every resource, sorted
    pub fn resource_type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .resources()
            .iter()
            .map(|new| new().type_name(TYPE_NAME))
            .collect();
        names.sort();
        names
    }

    /// A resource instance, configured with the client when there is one
    pub fn resource(&self, type_name: &str) -> Option<Box<dyn Resource>> {
        let mut resource = self
            .resources()
            .into_iter()
            .map(|new| new())
            .find(|resource| resource.type_name(TYPE_NAME) == type_name)?;

        let diags = match &self.client {
            Some(client) => {
                let data: Box<ProviderData> = Box::new(Arc::clone(client));
                resource.configure(Some(data.as_ref()))
            }
            None => resource.configure(None),
        };
        if !diags.is_empty() {
            warn!("Configuring {} failed: {:?}", type_name, diags);
        }
        Some(resource)
    }

    /// Constructors of every data source type
    pub fn data_sources(&self) -> Vec<DataSourceFactory> {
        resources::data_source_registry()
    }

    /// A data source instance, configured with the client when there is one
    pub fn data_source(&self, type_name: &str) -> Option<Box<dyn DataSource>> {
        let mut source = self
            .data_sources()
            .into_iter()
            .map(|new| new())
            .find(|source| source.type_name(TYPE_NAME) == type_name)?;

        let diags = match &self.client {
            Some(client) => {
                let data: Box<ProviderData> = Box::new(Arc::clone(client));
                source.configure(Some(data.as_ref()))
            }
            None => source.configure(None),
        };
        if !diags.is_empty() {
            warn!("Configuring data source {} failed: {:?}", type_name, diags);
        }
        Some(source)
    }
}
