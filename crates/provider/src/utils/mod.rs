//! Helpers shared by every resource
//!
//! - `state.rs` - mapping API responses into state, including reference reconciliation
//! - `request.rs` - turning plan values into request fields
//! - `tags.rs` - tag slugs to nested tags and back
//! - `custom_fields.rs` - custom field conversion, merge and import inference
//! - `errors.rs` - API error formatting and duplicate detection on create

pub mod custom_fields;
pub mod errors;
pub mod request;
pub mod state;
pub mod tags;

pub use custom_fields::{
    build_custom_field_models, custom_fields_to_map, map_to_custom_field_models,
    merge_custom_fields, CustomFieldModel,
};
pub use errors::{format_api_error, parse_duplicate_fields, CreateErrorHandler};
pub use request::{parse_id, parse_state_id, safe_int32};
pub use state::reconcile_reference;
pub use tags::{build_tags_request, tags_from_api};
