//! AddMetricHandler - command handler for creating metric columns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, MetricId, SerializableDomainEvent, Timestamp,
    ValidationError,
};
use crate::domain::matrix::Metric;
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to add a metric column.
#[derive(Debug, Clone)]
pub struct AddMetricCommand {
    pub name: String,
    pub target: f64,
    pub unit: String,
}

/// Result of successfully adding a metric.
#[derive(Debug, Clone)]
pub struct AddMetricResult {
    pub metric: Metric,
}

/// Event published when a metric is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricAddedEvent {
    pub event_id: EventId,
    pub metric_id: MetricId,
    pub added_at: Timestamp,
}

domain_event!(
    MetricAddedEvent,
    event_type = "alignment.metric_added.v1",
    schema_version = 1,
    aggregate_id = metric_id,
    aggregate_type = "Metric",
    occurred_at = added_at,
    event_id = event_id
);

/// Error type for adding a metric.
#[derive(Debug, Clone)]
pub enum AddMetricError {
    Validation(ValidationError),
    Domain(DomainError),
}

impl std::fmt::Display for AddMetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddMetricError::Validation(err) => write!(f, "{}", err),
            AddMetricError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddMetricError {}

impl From<ValidationError> for AddMetricError {
    fn from(err: ValidationError) -> Self {
        AddMetricError::Validation(err)
    }
}

impl From<DomainError> for AddMetricError {
    fn from(err: DomainError) -> Self {
        AddMetricError::Domain(err)
    }
}

/// Handler for adding metrics.
pub struct AddMetricHandler {
    metrics: Arc<dyn CollectionStore<Metric>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddMetricHandler {
    pub fn new(
        metrics: Arc<dyn CollectionStore<Metric>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            metrics,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddMetricCommand,
        metadata: CommandMetadata,
    ) -> Result<AddMetricResult, AddMetricError> {
        let metric = Metric::new(cmd.name, cmd.target, cmd.unit)?;

        let mut snapshot = self.metrics.snapshot().await?;
        snapshot.items.push(metric.clone());
        self.metrics
            .commit(snapshot.revision, snapshot.items)
            .await?;

        let event = MetricAddedEvent {
            event_id: EventId::new(),
            metric_id: metric.id(),
            added_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(AddMetricResult { metric })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCollectionStore, InMemoryEventBus};
    use crate::domain::foundation::UserId;
    use crate::ports::collections;

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("test-user").unwrap())
    }

    fn handler() -> (
        AddMetricHandler,
        Arc<InMemoryCollectionStore<Metric>>,
        Arc<InMemoryEventBus>,
    ) {
        let store = Arc::new(InMemoryCollectionStore::new(collections::METRICS));
        let bus = Arc::new(InMemoryEventBus::new());
        (AddMetricHandler::new(store.clone(), bus.clone()), store, bus)
    }

    #[tokio::test]
    async fn appends_metric_and_publishes_event() {
        let (handler, store, bus) = handler();

        let cmd = AddMetricCommand {
            name: "Revenue".to_string(),
            target: 20.0,
            unit: "%".to_string(),
        };
        let result = handler.handle(cmd, metadata()).await.unwrap();

        assert_eq!(result.metric.name(), "Revenue");
        assert_eq!(store.snapshot().await.unwrap().items.len(), 1);
        assert_eq!(bus.events_of_type("alignment.metric_added.v1").len(), 1);
    }

    #[tokio::test]
    async fn rejects_missing_unit_without_writing() {
        let (handler, store, bus) = handler();

        let cmd = AddMetricCommand {
            name: "Revenue".to_string(),
            target: 20.0,
            unit: String::new(),
        };
        let result = handler.handle(cmd, metadata()).await;

        assert!(matches!(result, Err(AddMetricError::Validation(_))));
        assert!(store.snapshot().await.unwrap().items.is_empty());
        assert_eq!(bus.event_count(), 0);
    }
}
