//! NetBox infrastructure provider
//!
//! Exposes NetBox objects (sites, devices, interfaces, prefixes, circuits,
//! tunnels and more) as managed resources with create, read, update, delete
//! and import operations, plus a read-only data source per object type.
//! Each resource is a thin description over the generic engine in
//! [`resources::engine`]; the [`server`] module speaks a line-oriented JSON
//! protocol to the host.

pub mod config;
pub mod error;
pub mod framework;
pub mod lookup;
pub mod provider;
pub mod resources;
pub mod schema_attrs;
pub mod server;
pub mod utils;
pub mod validators;

pub use error::ProviderError;
pub use provider::NetboxProvider;
pub use server::Server;
