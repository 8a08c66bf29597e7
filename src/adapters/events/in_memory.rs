//! In-memory event bus.
//!
//! Synchronous, deterministic delivery: envelopes are recorded in order and
//! logged through `tracing`. Serves both the single-process deployment and
//! test assertions.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// Event bus that records every published envelope.
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
        }
    }

    /// Returns all published events (for assertions).
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published.read().map(|events| events.len()).unwrap_or(0)
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        if let Ok(mut events) = self.published.write() {
            events.clear();
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            "event published"
        );
        self.published
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "event bus lock poisoned"))?
            .push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: "agg-1".to_string(),
            aggregate_type: "Test".to_string(),
            occurred_at: Timestamp::now(),
            payload: serde_json::json!({}),
            metadata: EventMetadata::default(),
        }
    }

    #[tokio::test]
    async fn records_published_events_in_order() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("a.v1")).await.unwrap();
        bus.publish(envelope("b.v1")).await.unwrap();

        let events = bus.published_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "a.v1");
        assert_eq!(events[1].event_type, "b.v1");
    }

    #[tokio::test]
    async fn filters_events_by_type() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("a.v1")).await.unwrap();
        bus.publish(envelope("b.v1")).await.unwrap();
        bus.publish(envelope("a.v1")).await.unwrap();

        assert_eq!(bus.events_of_type("a.v1").len(), 2);
        assert_eq!(bus.events_of_type("c.v1").len(), 0);
    }

    #[tokio::test]
    async fn publish_all_delivers_every_event() {
        let bus = InMemoryEventBus::new();
        bus.publish_all(vec![envelope("a.v1"), envelope("b.v1")])
            .await
            .unwrap();
        assert_eq!(bus.event_count(), 2);
    }

    #[tokio::test]
    async fn clear_resets_the_bus() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("a.v1")).await.unwrap();
        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}
