//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

#[cfg(feature = "admin-api")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(feature = "admin-api")]
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache name is not part of the registry
    #[error("Unknown cache: {0}")]
    UnknownCache(String),

    /// Key not found in a named cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Value could not be encoded to or decoded from the stored format
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store rejected or failed a command
    #[error("Store error: {0}")]
    Store(String),

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_io_error() || err.is_timeout() {
            CacheError::Unavailable(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
#[cfg(feature = "admin-api")]
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownCache(_) | CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Serialization(_) | CacheError::Store(_) | CacheError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
