//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CrmBridge
///
/// Carries enough information (HTTP status plus raw response body) for an
/// outer routing layer to map failures onto its own status codes.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CrmError {
    /// The remote API answered with a non-2xx status other than 404.
    #[error("remote API error (status {status}): {message}")]
    RemoteApi { status: u16, message: String, body: String },

    /// The remote API answered 404 for a targeted record.
    #[error("not found: {message}")]
    NotFound { message: String, body: String },

    /// Caller input the core cannot act on (e.g. an unknown object kind).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection or timeout failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CrmError {
    /// Classify a non-2xx remote response.
    ///
    /// 404 becomes [`CrmError::NotFound`]; everything else becomes
    /// [`CrmError::RemoteApi`]. The raw body is preserved on both variants.
    pub fn from_status(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        let message = message.into();
        let body = body.into();
        if status == 404 {
            Self::NotFound { message, body }
        } else {
            Self::RemoteApi { status, message, body }
        }
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// The raw remote response body, if this error carries one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RemoteApi { body, .. } | Self::NotFound { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for CrmBridge operations
pub type Result<T> = std::result::Result<T, CrmError>;
