//! AddDependencyHandler - command handler for creating dependency edges.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::dependency::{Dependency, DependencyKind, InitiativeRef};
use crate::domain::foundation::{
    CommandMetadata, DependencyId, DomainError, EventId, SerializableDomainEvent, Timestamp,
    ValidationError,
};
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to add a dependency between two initiatives.
///
/// Titles are point-in-time snapshots supplied by the caller; the engine
/// never re-derives them and never checks that the initiative ids exist.
#[derive(Debug, Clone)]
pub struct AddDependencyCommand {
    pub from: InitiativeRef,
    pub to: InitiativeRef,
    pub kind: DependencyKind,
    pub description: String,
}

/// Result of successfully adding a dependency.
#[derive(Debug, Clone)]
pub struct AddDependencyResult {
    pub dependency: Dependency,
}

/// Event published when a dependency is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyAddedEvent {
    pub event_id: EventId,
    pub dependency_id: DependencyId,
    pub kind: DependencyKind,
    pub added_at: Timestamp,
}

domain_event!(
    DependencyAddedEvent,
    event_type = "dependency.added.v1",
    schema_version = 1,
    aggregate_id = dependency_id,
    aggregate_type = "Dependency",
    occurred_at = added_at,
    event_id = event_id
);

/// Error type for adding a dependency.
#[derive(Debug, Clone)]
pub enum AddDependencyError {
    /// Self-loop or empty description; nothing was written.
    Validation(ValidationError),
    /// Storage or publishing failure.
    Domain(DomainError),
}

impl std::fmt::Display for AddDependencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddDependencyError::Validation(err) => write!(f, "{}", err),
            AddDependencyError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddDependencyError {}

impl From<ValidationError> for AddDependencyError {
    fn from(err: ValidationError) -> Self {
        AddDependencyError::Validation(err)
    }
}

impl From<DomainError> for AddDependencyError {
    fn from(err: DomainError) -> Self {
        AddDependencyError::Domain(err)
    }
}

/// Handler for adding dependencies.
pub struct AddDependencyHandler {
    dependencies: Arc<dyn CollectionStore<Dependency>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddDependencyHandler {
    pub fn new(
        dependencies: Arc<dyn CollectionStore<Dependency>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            dependencies,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddDependencyCommand,
        metadata: CommandMetadata,
    ) -> Result<AddDependencyResult, AddDependencyError> {
        let dependency = Dependency::new(cmd.from, cmd.to, cmd.kind, cmd.description)?;

        let mut snapshot = self.dependencies.snapshot().await?;
        snapshot.items.push(dependency.clone());
        self.dependencies
            .commit(snapshot.revision, snapshot.items)
            .await?;

        let event = DependencyAddedEvent {
            event_id: EventId::new(),
            dependency_id: dependency.id(),
            kind: dependency.kind(),
            added_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(AddDependencyResult { dependency })
    }
}
