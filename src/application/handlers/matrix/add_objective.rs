//! AddObjectiveHandler - command handler for creating objective rows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, ObjectiveId, SerializableDomainEvent, Timestamp,
    ValidationError,
};
use crate::domain::matrix::{Objective, ObjectiveKind};
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to add a strategic objective.
#[derive(Debug, Clone)]
pub struct AddObjectiveCommand {
    pub kind: ObjectiveKind,
    pub description: String,
}

/// Result of successfully adding an objective.
#[derive(Debug, Clone)]
pub struct AddObjectiveResult {
    pub objective: Objective,
}

/// Event published when an objective is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveAddedEvent {
    pub event_id: EventId,
    pub objective_id: ObjectiveId,
    pub kind: ObjectiveKind,
    pub added_at: Timestamp,
}

domain_event!(
    ObjectiveAddedEvent,
    event_type = "alignment.objective_added.v1",
    schema_version = 1,
    aggregate_id = objective_id,
    aggregate_type = "Objective",
    occurred_at = added_at,
    event_id = event_id
);

/// Error type for adding an objective.
#[derive(Debug, Clone)]
pub enum AddObjectiveError {
    /// Required field missing or invalid; nothing was written.
    Validation(ValidationError),
    /// Storage or publishing failure.
    Domain(DomainError),
}

impl std::fmt::Display for AddObjectiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddObjectiveError::Validation(err) => write!(f, "{}", err),
            AddObjectiveError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddObjectiveError {}

impl From<ValidationError> for AddObjectiveError {
    fn from(err: ValidationError) -> Self {
        AddObjectiveError::Validation(err)
    }
}

impl From<DomainError> for AddObjectiveError {
    fn from(err: DomainError) -> Self {
        AddObjectiveError::Domain(err)
    }
}

/// Handler for adding objectives.
pub struct AddObjectiveHandler {
    objectives: Arc<dyn CollectionStore<Objective>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddObjectiveHandler {
    pub fn new(
        objectives: Arc<dyn CollectionStore<Objective>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            objectives,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddObjectiveCommand,
        metadata: CommandMetadata,
    ) -> Result<AddObjectiveResult, AddObjectiveError> {
        // Validation happens before the snapshot is touched.
        let objective = Objective::new(cmd.kind, cmd.description)?;

        let mut snapshot = self.objectives.snapshot().await?;
        snapshot.items.push(objective.clone());
        self.objectives
            .commit(snapshot.revision, snapshot.items)
            .await?;

        let event = ObjectiveAddedEvent {
            event_id: EventId::new(),
            objective_id: objective.id(),
            kind: objective.kind(),
            added_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(AddObjectiveResult { objective })
    }
}
