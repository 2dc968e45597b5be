//! Error types for the pickbox crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the pickbox control.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. No variant is fatal to the
/// control; the controller logs and degrades on source failures.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PickError {
    /// Injected source function failed (network, backend, etc.)
    #[error("Source error: {message}")]
    Source { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Operation attempted on a disabled control
    #[error("Control is disabled")]
    Disabled,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PickError {
    /// Creates a Source error
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Source error
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source { .. })
    }

    /// Check if this is a Disabled error
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl From<serde_json::Error> for PickError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PickError>`.
pub type Result<T> = std::result::Result<T, PickError>;
