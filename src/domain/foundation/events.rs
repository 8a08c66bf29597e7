//! Event infrastructure for domain event publishing.
//!
//! Provides the core types for event-driven integration:
//! - `EventId` - unique identifier for events (deduplication)
//! - `EventMetadata` - correlation and user context
//! - `EventEnvelope` - transport wrapper for domain events
//! - `DomainEvent` - trait that all domain events implement
//! - `domain_event!` - macro to implement `DomainEvent` with minimal boilerplate

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Unique identifier for an event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random EventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation and user context attached to an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Trait that all domain events must implement.
///
/// The event type string carries an explicit version suffix
/// (e.g. "alignment.link_toggled.v1") so stored events stay readable
/// across schema evolution.
pub trait DomainEvent: Send + Sync {
    /// Returns the versioned event type string.
    fn event_type(&self) -> &'static str;

    /// Returns the schema version number (must match the type suffix).
    fn schema_version(&self) -> u32;

    /// Returns the ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Returns the aggregate type (e.g. "AlignmentLink", "PdcaCycle").
    fn aggregate_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> EventId;
}

/// Extension trait providing `to_envelope()` for serializable domain events.
///
/// Blanket-implemented for any `DomainEvent + Serialize`, so event authors
/// write no transport code.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            schema_version: self.schema_version(),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Transport wrapper around a serialized domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Attaches a correlation id.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(correlation_id.into());
        self
    }

    /// Attaches the acting user's id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.metadata.user_id = Some(user_id.into());
        self
    }
}

/// Implements `DomainEvent` by mapping trait methods onto struct fields.
#[macro_export]
macro_rules! domain_event {
    (
        $event:ty,
        event_type = $event_type:literal,
        schema_version = $version:literal,
        aggregate_id = $aggregate_id:ident,
        aggregate_type = $aggregate_type:literal,
        occurred_at = $occurred_at:ident,
        event_id = $event_id:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn schema_version(&self) -> u32 {
                $version
            }

            fn aggregate_id(&self) -> String {
                self.$aggregate_id.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $aggregate_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_at
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id
            }
        }
    };
}

pub use crate::domain_event;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PdcaCycleId;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestEvent {
        event_id: EventId,
        cycle_id: PdcaCycleId,
        occurred_at: Timestamp,
    }

    domain_event!(
        TestEvent,
        event_type = "test.happened.v1",
        schema_version = 1,
        aggregate_id = cycle_id,
        aggregate_type = "PdcaCycle",
        occurred_at = occurred_at,
        event_id = event_id
    );

    fn test_event() -> TestEvent {
        TestEvent {
            event_id: EventId::new(),
            cycle_id: PdcaCycleId::new(),
            occurred_at: Timestamp::now(),
        }
    }

    #[test]
    fn macro_wires_trait_methods_to_fields() {
        let event = test_event();
        assert_eq!(event.event_type(), "test.happened.v1");
        assert_eq!(event.schema_version(), 1);
        assert_eq!(event.aggregate_id(), event.cycle_id.to_string());
        assert_eq!(event.aggregate_type(), "PdcaCycle");
    }

    #[test]
    fn to_envelope_serializes_event_as_payload() {
        let event = test_event();
        let envelope = event.to_envelope();

        assert_eq!(envelope.event_type, "test.happened.v1");
        assert_eq!(envelope.aggregate_id, event.cycle_id.to_string());
        assert_eq!(
            envelope.payload["cycle_id"],
            serde_json::json!(event.cycle_id.to_string())
        );
    }

    #[test]
    fn envelope_builder_attaches_metadata() {
        let envelope = test_event()
            .to_envelope()
            .with_correlation_id("corr-1")
            .with_user_id("user-1");

        assert_eq!(envelope.metadata.correlation_id.as_deref(), Some("corr-1"));
        assert_eq!(envelope.metadata.user_id.as_deref(), Some("user-1"));
    }
}
