//! Shared HTTP error body.
//!
//! Every endpoint reports failures with the same `{kind, message}` JSON
//! shape so clients can handle errors uniformly across contexts.

use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind.
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self {
            kind: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource, id),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: "UNAUTHORIZED".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
