//! Provider error types.
//!
//! This module defines the errors raised by the provider itself; NetBox API
//! failures arrive as [`NetBoxError`] and are wrapped where they need context.

use netbox_client::NetBoxError;
use thiserror::Error;

/// Errors parsing an object id held in state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Empty string
    #[error("ID cannot be empty")]
    Empty,

    /// Not a decimal integer
    #[error("invalid ID {0:?}")]
    Invalid(String),

    /// Larger than NetBox's 32-bit primary keys
    #[error("value {0} overflows int32 range")]
    Overflow(i64),
}

/// Errors resolving a reference (name, slug or id) to an object
#[derive(Debug, Error)]
pub enum LookupError {
    /// Numeric id did not resolve
    #[error("Could not find {label} with ID {id}: {source}")]
    ById {
        /// Object type label
        label: &'static str,
        /// Requested id
        id: u64,
        /// Client error
        #[source]
        source: NetBoxError,
    },

    /// No object matched by slug or name
    #[error("No {label} found with slug or name '{value}'")]
    NotFound {
        /// Object type label
        label: &'static str,
        /// Requested value
        value: String,
    },

    /// More than one object matched
    #[error("Multiple {label} objects ({count}) match '{value}'; use the ID to select one")]
    Ambiguous {
        /// Object type label
        label: &'static str,
        /// Requested value
        value: String,
        /// Number of matches
        count: usize,
    },

    /// Listing failed
    #[error("NetBox error: {0}")]
    Client(#[from] NetBoxError),
}

/// Errors in the provider host process
#[derive(Debug, Error)]
pub enum ProviderError {
    /// NetBox API error
    #[error("NetBox error: {0}")]
    NetBox(#[from] NetBoxError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No resource type with this name
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// No data source type with this name
    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),

    /// Malformed host message
    #[error("Invalid request: {0}")]
    Protocol(#[from] serde_json::Error),

    /// Reading stdin or writing stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
