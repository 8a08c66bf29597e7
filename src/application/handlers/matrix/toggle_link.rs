//! ToggleLinkHandler - command handler for cycling a matrix cell.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, ObjectiveId, SerializableDomainEvent, Timestamp,
};
use crate::domain::matrix::{AlignmentLink, AlignmentMatrix, Column, Strength};
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to toggle the link at a matrix cell.
///
/// The ids are not checked against the objective/metric/action collections;
/// toggling a cell for ids that no longer exist is accepted and the
/// resulting link dangles.
#[derive(Debug, Clone)]
pub struct ToggleLinkCommand {
    pub objective_id: ObjectiveId,
    pub column: Column,
}

/// Result of a toggle: the link as stored afterwards, or `None` when the
/// weak→absent step removed it.
#[derive(Debug, Clone)]
pub struct ToggleLinkResult {
    pub link: Option<AlignmentLink>,
}

/// Event published when a cell is toggled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkToggledEvent {
    pub event_id: EventId,
    pub objective_id: ObjectiveId,
    pub column: Column,
    /// Strength after the toggle; `None` means the link was removed.
    pub strength: Option<Strength>,
    pub toggled_at: Timestamp,
}

domain_event!(
    LinkToggledEvent,
    event_type = "alignment.link_toggled.v1",
    schema_version = 1,
    aggregate_id = objective_id,
    aggregate_type = "AlignmentLink",
    occurred_at = toggled_at,
    event_id = event_id
);

/// Error type for toggling a link.
#[derive(Debug, Clone)]
pub enum ToggleLinkError {
    Domain(DomainError),
}

impl std::fmt::Display for ToggleLinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToggleLinkError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ToggleLinkError {}

impl From<DomainError> for ToggleLinkError {
    fn from(err: DomainError) -> Self {
        ToggleLinkError::Domain(err)
    }
}

/// Handler for toggling alignment links.
pub struct ToggleLinkHandler {
    links: Arc<dyn CollectionStore<AlignmentLink>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ToggleLinkHandler {
    pub fn new(
        links: Arc<dyn CollectionStore<AlignmentLink>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            links,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ToggleLinkCommand,
        metadata: CommandMetadata,
    ) -> Result<ToggleLinkResult, ToggleLinkError> {
        let snapshot = self.links.snapshot().await?;

        let mut matrix = AlignmentMatrix::from_links(snapshot.items);
        let link = matrix.toggle(cmd.objective_id, cmd.column);
        self.links
            .commit(snapshot.revision, matrix.into_links())
            .await?;

        let event = LinkToggledEvent {
            event_id: EventId::new(),
            objective_id: cmd.objective_id,
            column: cmd.column,
            strength: link.map(|l| l.strength),
            toggled_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(ToggleLinkResult { link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCollectionStore, InMemoryEventBus};
    use crate::domain::foundation::{MetricId, UserId};
    use crate::ports::{collections, Revision};

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("test-user").unwrap())
    }

    fn handler() -> (
        ToggleLinkHandler,
        Arc<InMemoryCollectionStore<AlignmentLink>>,
        Arc<InMemoryEventBus>,
    ) {
        let store = Arc::new(InMemoryCollectionStore::new(collections::ALIGNMENT_LINKS));
        let bus = Arc::new(InMemoryEventBus::new());
        (ToggleLinkHandler::new(store.clone(), bus.clone()), store, bus)
    }

    fn cmd() -> ToggleLinkCommand {
        ToggleLinkCommand {
            objective_id: ObjectiveId::new(),
            column: Column::Metric(MetricId::new()),
        }
    }

    #[tokio::test]
    async fn four_toggles_walk_strong_medium_weak_absent() {
        let (handler, store, _) = handler();
        let cmd = cmd();

        let mut observed = Vec::new();
        for _ in 0..4 {
            let result = handler.handle(cmd.clone(), metadata()).await.unwrap();
            observed.push(result.link.map(|l| l.strength));
        }

        assert_eq!(
            observed,
            vec![
                Some(Strength::Strong),
                Some(Strength::Medium),
                Some(Strength::Weak),
                None,
            ]
        );
        assert!(store.snapshot().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn publishes_toggle_event_with_resulting_strength() {
        let (handler, _, bus) = handler();
        let cmd = cmd();

        handler.handle(cmd.clone(), metadata()).await.unwrap();

        let events = bus.events_of_type("alignment.link_toggled.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload["strength"], serde_json::json!("strong"));
    }

    #[tokio::test]
    async fn concurrent_toggle_against_stale_snapshot_is_rejected_by_store() {
        let (handler, store, _) = handler();

        // A competing writer bumps the revision between this handler's
        // snapshot and commit. Simulated by pre-committing here, then
        // letting the handler run against the moved collection: the
        // handler snapshots fresh, so instead interleave at the store
        // level.
        let stale = store.snapshot().await.unwrap();
        handler.handle(cmd(), metadata()).await.unwrap();

        let err = store
            .commit(stale.revision, stale.items)
            .await
            .unwrap_err();
        assert_eq!(
            err.code,
            crate::domain::foundation::ErrorCode::ConcurrentModification
        );
        assert_eq!(store.snapshot().await.unwrap().revision, Revision::new(1));
    }
}
