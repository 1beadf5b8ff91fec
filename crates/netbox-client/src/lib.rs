//! NetBox REST API Client
//!
//! A Rust client library for interacting with the NetBox REST API.
//! Provides type-safe models, writable request bodies and a
//! [`NetBoxClientTrait`] seam that the provider resources are written against.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{api, endpoint, NetBoxClient, Site};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Look up active sites
//! let sites: Vec<Site> = api::list(&client, &endpoint::SITES, &[("status", "active")]).await?;
//!
//! // Fetch one by id
//! let site: Site = api::get(&client, &endpoint::SITES, sites[0].id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **DCIM, IPAM, Tenancy, Circuits, VPN and Extras** object models
//! - **Pagination**: Support for fetching all pages of large result sets
//! - **Mocking**: `test-util` feature exposes an in-memory [`MockNetBoxClient`]

pub mod api;
pub mod client;
pub mod common;
pub mod endpoint;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::NetBoxClient;
pub use common::{HttpClient, PaginatedResponse};
pub use endpoint::Endpoint;
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(feature = "test-util")]
pub use mock::MockNetBoxClient;
