//! AddActionHandler - command handler for creating improvement-action columns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ActionId, CommandMetadata, DomainError, EventId, SerializableDomainEvent, Timestamp,
    ValidationError,
};
use crate::domain::matrix::ActionItem;
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to add an improvement action.
#[derive(Debug, Clone)]
pub struct AddActionCommand {
    pub description: String,
    pub owner: String,
}

/// Result of successfully adding an action.
#[derive(Debug, Clone)]
pub struct AddActionResult {
    pub action: ActionItem,
}

/// Event published when an action is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionAddedEvent {
    pub event_id: EventId,
    pub action_id: ActionId,
    pub added_at: Timestamp,
}

domain_event!(
    ActionAddedEvent,
    event_type = "alignment.action_added.v1",
    schema_version = 1,
    aggregate_id = action_id,
    aggregate_type = "ActionItem",
    occurred_at = added_at,
    event_id = event_id
);

/// Error type for adding an action.
#[derive(Debug, Clone)]
pub enum AddActionError {
    Validation(ValidationError),
    Domain(DomainError),
}

impl std::fmt::Display for AddActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddActionError::Validation(err) => write!(f, "{}", err),
            AddActionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddActionError {}

impl From<ValidationError> for AddActionError {
    fn from(err: ValidationError) -> Self {
        AddActionError::Validation(err)
    }
}

impl From<DomainError> for AddActionError {
    fn from(err: DomainError) -> Self {
        AddActionError::Domain(err)
    }
}

/// Handler for adding improvement actions.
pub struct AddActionHandler {
    actions: Arc<dyn CollectionStore<ActionItem>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddActionHandler {
    pub fn new(
        actions: Arc<dyn CollectionStore<ActionItem>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            actions,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddActionCommand,
        metadata: CommandMetadata,
    ) -> Result<AddActionResult, AddActionError> {
        let action = ActionItem::new(cmd.description, cmd.owner)?;

        let mut snapshot = self.actions.snapshot().await?;
        snapshot.items.push(action.clone());
        self.actions
            .commit(snapshot.revision, snapshot.items)
            .await?;

        let event = ActionAddedEvent {
            event_id: EventId::new(),
            action_id: action.id(),
            added_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(AddActionResult { action })
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
        AddActionHandler,
        Arc<InMemoryCollectionStore<ActionItem>>,
        Arc<InMemoryEventBus>,
    ) {
        let store = Arc::new(InMemoryCollectionStore::new(collections::ACTIONS));
        let bus = Arc::new(InMemoryEventBus::new());
        (AddActionHandler::new(store.clone(), bus.clone()), store, bus)
    }

    #[tokio::test]
    async fn appends_action_and_publishes_event() {
        let (handler, store, bus) = handler();

        let cmd = AddActionCommand {
            description: "Introduce daily standup".to_string(),
            owner: "Ann".to_string(),
        };
        let result = handler.handle(cmd, metadata()).await.unwrap();

        assert_eq!(result.action.owner(), "Ann");
        assert_eq!(store.snapshot().await.unwrap().items.len(), 1);
        assert_eq!(bus.events_of_type("alignment.action_added.v1").len(), 1);
    }

    #[tokio::test]
    async fn rejects_missing_owner_without_writing() {
        let (handler, store, bus) = handler();

        let cmd = AddActionCommand {
            description: "Introduce daily standup".to_string(),
            owner: " ".to_string(),
        };
        let result = handler.handle(cmd, metadata()).await;

        assert!(matches!(result, Err(AddActionError::Validation(_))));
        assert!(store.snapshot().await.unwrap().items.is_empty());
        assert_eq!(bus.event_count(), 0);
    }
}
