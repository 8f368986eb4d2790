//! Error types for the Charla application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Charla application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CharlaError {
    /// Invalid turn input (e.g. empty message text); short-circuits the pipeline
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure of an external language service call, tagged with the service name
    #[error("Adapter error ({service}): {message}")]
    Adapter { service: String, message: String },

    /// Data access error (history/analytics store)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error inside the orchestration logic itself
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CharlaError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Adapter error for the named external service
    pub fn adapter(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Adapter {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Adapter error
    pub fn is_adapter(&self) -> bool {
        matches!(self, Self::Adapter { .. })
    }
}

impl From<std::io::Error> for CharlaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CharlaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CharlaError>`.
pub type Result<T> = std::result::Result<T, CharlaError>;
