//! Tenancy resources: tenants and contacts.
//!
//! Tenant groups, contact groups and contact roles live in
//! [`super::organizational`].

pub mod contact;
pub mod tenant;

pub use contact::ContactResource;
pub use tenant::TenantResource;
