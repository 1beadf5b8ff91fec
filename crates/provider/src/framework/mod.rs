//! Plugin framework layer: values, diagnostics, schemas and the resource
//! and data source traits

pub mod data_source;
pub mod diag;
pub mod resource;
pub mod schema;
pub mod value;

pub use data_source::{DataSource, DataSourceReadRequest, DataSourceResponse};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use resource::{
    CreateRequest, DeleteRequest, ImportRequest, ProviderData, ReadRequest, Resource,
    ResourceResponse, UpdateRequest,
};
pub use schema::{Attribute, AttributeKind, Schema, Validator};
pub use value::{Attr, UNKNOWN};
