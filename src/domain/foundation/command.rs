//! Command infrastructure for CQRS handlers.
//!
//! Every command handler accepts a single `CommandMetadata` alongside its
//! command, so tracing and user context flow uniformly into emitted events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
///
/// Carries the acting user and a correlation id through command processing
/// and into emitted events. The user id is audit context only; this engine
/// performs no authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Links related operations across a single request.
    /// Generated at the API boundary if not provided.
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata for a user with no correlation id yet.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
        }
    }

    /// Sets the correlation id.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Returns the correlation id, generating a fresh one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}
