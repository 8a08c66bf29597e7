//! EventPublisher port - interface for publishing domain events.
//!
//! The domain publishes events without knowing the transport (in-memory
//! bus now; anything with at-least-once delivery later).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations deliver at-least-once (handlers may see duplicates)
/// and propagate errors to the caller.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single enveloped event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events, atomically where the adapter supports it;
    /// sequentially with best-effort delivery otherwise.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait stays object-safe.
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}
}
