//! NetBox client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox API returned an error
    #[error("NetBox API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// NetBox rejected the request body with HTTP 400.
    ///
    /// The body is kept verbatim; NetBox returns a JSON map of field name
    /// to validation messages, which callers inspect for duplicates.
    #[error("Bad request to {path}: {body}")]
    BadRequest {
        /// Request path
        path: String,
        /// Raw response body
        body: String,
    },
}

impl NetBoxError {
    /// True when the remote object does not exist (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, NetBoxError::NotFound(_))
    }

    /// Response body attached to the error, if NetBox sent one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            NetBoxError::BadRequest { body, .. } => Some(body),
            _ => None,
        }
    }
}
